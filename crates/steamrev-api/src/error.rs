use thiserror::Error;

/// Failure taxonomy for the Steam endpoints.
///
/// Every variant is fatal to the acquisition call that hit it; nothing here
/// is retried in place.
#[derive(Debug, Error)]
pub enum SteamError {
    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected http status: {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("steam api reported failure: success = {success}")]
    Api { success: i64 },

    #[error("game '{0}' not found in the app list")]
    AppNotFound(String),
}
