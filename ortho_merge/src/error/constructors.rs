//! Constructors and conversions for the crate's error types.

use figment::Error as FigmentError;

use super::{AccessorError, MergeError};

impl AccessorError {
    /// Construct an accessor failure for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ortho_merge::AccessorError;
    /// let err = AccessorError::new("total", "not ready");
    /// assert_eq!(err.to_string(), "accessor failed for 'total': not ready");
    /// ```
    #[must_use]
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Construct an accessor failure that is not yet tied to a key.
    ///
    /// [`crate::Structure::get`] fills in the key when the failure surfaces
    /// through a property read.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(String::new(), message)
    }

    pub(crate) fn with_key(mut self, key: &str) -> Self {
        if self.key.is_empty() {
            key.clone_into(&mut self.key);
        }
        self
    }
}

impl MergeError {
    /// Wrap an error raised inside a user hook.
    ///
    /// The engine returns the error to the merge caller as-is.
    ///
    /// # Examples
    ///
    /// ```
    /// use ortho_merge::MergeError;
    /// let err = MergeError::hook(std::io::Error::other("denied"));
    /// assert_eq!(err.to_string(), "denied");
    /// ```
    #[must_use]
    pub fn hook<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Hook(source.into())
    }

    /// Construct an options error from a [`figment::Error`].
    #[must_use]
    pub fn options(source: FigmentError) -> Self {
        Self::Options(Box::new(source))
    }
}

impl From<FigmentError> for MergeError {
    fn from(e: FigmentError) -> Self {
        Self::options(e)
    }
}
