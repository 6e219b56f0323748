use thiserror::Error;

/// Why a payload could not be turned into comparable content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("File did not load")]
    NotLoaded,
    #[error("File did not load because of it was aborted")]
    Aborted,
    #[error("File did not load because of an error")]
    Errored,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("unknown file field '{0}' (expected one of: name, type, size, lastModified)")]
    UnknownField(String),
    #[error("unknown content mode '{0}' (expected readAsArrayBuffer, readAsBinaryString, readAsDataURL, readAsText or false)")]
    UnknownContentMode(String),
}

/// A failed assertion. Displays as the rendered matcher message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionError {
    pub message: String,
}

impl AssertionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
