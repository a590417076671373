#[derive(serde::Serialize)]
pub struct LogMessage {
    pub severity: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}
