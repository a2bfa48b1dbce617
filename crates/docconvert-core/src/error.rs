use thiserror::Error;

/// Local, pre-submission failure. Never reaches the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The request never produced a usable JSON body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Server answered with `success: false` or an `error` field.
    #[error("{0}")]
    Business(String),

    #[error("Error de conexión: {0}")]
    Transport(String),

    #[error("Solicitud reemplazada por una más reciente")]
    Superseded,
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        ClientError::Transport(err.0)
    }
}
