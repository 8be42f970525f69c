use serde::{Deserialize, Serialize};

use crate::models::elements::SlideElement;

/// A slide element kind representing a joined collection of elements.
/// Children are positioned relative to the group's origin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// The collection of elements in the group, in paint order.
    #[serde(default)]
    pub children: Vec<SlideElement>,
}
