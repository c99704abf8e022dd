use serde::Deserialize;

/// One upstream record. Only `body` is required; the rest is kept for logging.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceItem {
    #[serde(default)]
    pub post_id: Option<i64>,
    #[serde(default)]
    pub id: Option<i64>,
    pub body: String,
}

#[cfg(test)]
impl SourceItem {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            post_id: None,
            id: None,
            body: body.into(),
        }
    }
}
