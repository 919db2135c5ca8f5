use thiserror::Error;

/// Errors raised at the provider boundary.
///
/// Problems inside a payload never surface here; they leave the returned
/// record with `has_valid_data == false` instead.
#[derive(Debug, Error)]
pub enum GeneralizeError {
    #[error("unknown provider: {provider}")]
    UnknownProvider { provider: String },

    #[error("invalid {provider} payload")]
    InvalidPayload {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, GeneralizeError>;
