use serde::{Deserialize, Serialize};

/// Body of `POST /download`. Absent or null fields deserialize to `None`.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct DownloadRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    /// Document key, e.g. `air-cool`.
    #[serde(default)]
    pub pdf: Option<String>,
}

/// Error body returned for 4xx/5xx responses.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub time: String,
}

/// Body of `GET /db-check`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SinkCheckResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
