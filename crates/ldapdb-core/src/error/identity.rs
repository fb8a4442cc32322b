use super::Error;

/// Error when an entry's RDN or DN cannot be computed.
///
/// This occurs when:
/// - An RDN is built from a model type and the overrides do not cover the
///   primary key
/// - No mapped field contributes to the RDN
#[derive(Debug)]
pub(super) struct IdentityError {
    message: Box<str>,
}

impl std::error::Error for IdentityError {}

impl core::fmt::Display for IdentityError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "could not build distinguished name: {}", self.message)
    }
}

impl Error {
    /// Creates an identity error.
    pub fn identity(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Identity(IdentityError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an identity error.
    pub fn is_identity(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Identity(_))
    }
}
