use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedLocation {
    pub name: String,
    pub coordinates: [f64; 2],
    pub address: String,
    pub map_url: String,
}

/// A related link attached to a reply, optionally carrying the physical
/// locations it refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkInfo {
    pub url: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<NamedLocation>,
}
