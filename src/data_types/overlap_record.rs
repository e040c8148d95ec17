
use serde::Serialize;

use crate::data_types::edit_script::EditScript;
use crate::data_types::orientation::Orientation;

/// A single declared overlap between two segments (a GFA L-line without the node names)
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OverlapRecord {
    /// Orientation of the first segment
    orientation_a: Orientation,
    /// Orientation of the second segment
    orientation_b: Orientation,
    /// The declared edit script for the overlap
    edit_script: EditScript
}

impl OverlapRecord {
    /// Constructor
    pub fn new(orientation_a: Orientation, orientation_b: Orientation, edit_script: EditScript) -> Self {
        Self {
            orientation_a, orientation_b, edit_script
        }
    }

    // getters
    pub fn orientation_a(&self) -> Orientation {
        self.orientation_a
    }

    pub fn orientation_b(&self) -> Orientation {
        self.orientation_b
    }

    pub fn edit_script(&self) -> &EditScript {
        &self.edit_script
    }
}

impl std::fmt::Display for OverlapRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.orientation_a, self.orientation_b, self.edit_script)
    }
}
