use serde::Deserialize;

/// Body of POST/PUT `/entries`. Fields are optional so missing ones are
/// reported, not rejected by serde.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPayload {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
}
