use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct Label {
    #[serde(rename = "name")]
    pub name: String,

    #[serde(rename = "color")]
    pub color: String,
}

/// Body of a create-label request. GitHub picks a color when none is given.
#[derive(Debug, Serialize)]
pub struct NewLabel<'a> {
    #[serde(rename = "name")]
    pub name: &'a str,

    #[serde(rename = "color", skip_serializing_if = "Option::is_none")]
    pub color: Option<&'a str>,
}
