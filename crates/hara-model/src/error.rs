use thiserror::Error;

/// Errors from text-generation providers.
///
/// These stop at the pipeline boundary: callers catch them and degrade the
/// affected hazard to an empty-shape extraction; the deterministic kernel
/// never sees a provider failure.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("missing API key: set {env_var}")]
    MissingApiKey { env_var: &'static str },

    #[error("transport failure talking to {model}: {source}")]
    Transport {
        model: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("provider rejected request for {model} (status {status}): {message}")]
    Provider {
        model: String,
        status: u16,
        message: String,
    },

    #[error("provider returned no completion choices for {model}")]
    EmptyResponse { model: String },
}
