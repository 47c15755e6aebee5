//! Typed provider errors
//!
//! The provider call never smuggles failures inside the markup payload; the
//! caller checks this error before any later pipeline stage runs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("GIGACHAT_CREDENTIALS is not configured")]
    MissingCredentials,

    #[error("модель {model} не поддерживает распознавание изображений; выберите GigaChat-Max для работы с картинками")]
    UnsupportedModel { model: String },

    #[error("provider unreachable: {0}")]
    Unavailable(String),

    #[error("provider rejected the request: HTTP {status} - {detail}")]
    Rejected { status: u16, detail: String },

    #[error("provider request timed out")]
    Timeout,

    #[error("provider returned an empty completion")]
    EmptyResponse,
}

impl ProviderError {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Unavailable(err.to_string())
        }
    }
}
