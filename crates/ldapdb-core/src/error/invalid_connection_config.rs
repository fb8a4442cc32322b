use crate::Error;

#[derive(Debug)]
pub(super) struct InvalidConnectionConfig {
    pub(super) message: Box<str>,
}

impl Error {
    pub fn invalid_connection_config(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConnectionConfig(
            InvalidConnectionConfig {
                message: message.into().into(),
            },
        ))
    }

    pub fn is_invalid_connection_config(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidConnectionConfig(_))
    }
}

impl std::fmt::Display for InvalidConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid connection config: {}", self.message)
    }
}
