use super::Error;

/// Error when a directory operation fails.
///
/// This wraps errors from the underlying directory client:
/// - Connection and bind errors
/// - Add, modify, rename and delete failures reported by the server
/// - Search failures during a point lookup
#[derive(Debug)]
pub(super) struct DirectoryOperationFailed {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for DirectoryOperationFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for DirectoryOperationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Display the error and walk its source chain
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from a directory client failure.
    ///
    /// Drivers use this to surface their native errors (`ldap3::LdapError`,
    /// in-memory directory errors, ...) unchanged.
    pub fn directory_operation_failed(
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Error {
        Error::from(super::ErrorKind::DirectoryOperationFailed(
            DirectoryOperationFailed {
                inner: Box::new(err),
            },
        ))
    }

    /// Returns `true` if this error is a directory operation failure.
    pub fn is_directory_operation_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DirectoryOperationFailed(_))
    }
}
