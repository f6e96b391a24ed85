use std::fmt;

/// Application-level error reported inside a PayPal NVP response body.
///
/// PayPal answers failed calls with HTTP 200 and an `L_ERRORCODE0` field, so
/// these have to be picked out of the decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteApiError {
    pub code: String,
    pub short_message: String,
    pub long_message: String,
}

impl fmt::Display for RemoteApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}",
            self.code, self.short_message, self.long_message
        )
    }
}

impl std::error::Error for RemoteApiError {}

/// Application-specific error types.
#[derive(Debug)]
pub enum AppError {
    /// PayPal returned an error code in the response payload.
    RemoteApi(RemoteApiError),
    /// Network failure or non-success HTTP status, kept as reqwest reported it.
    Transport(reqwest::Error),
    /// Invalid settings or an unreadable credentials file.
    Config(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl AppError {
    /// Returns the remote API error, looking through any context wrappers.
    pub fn as_remote_api(&self) -> Option<&RemoteApiError> {
        match self {
            AppError::RemoteApi(e) => Some(e),
            AppError::WithContext { source, .. } => source.as_remote_api(),
            _ => None,
        }
    }

    /// Returns the transport error, looking through any context wrappers.
    pub fn as_transport(&self) -> Option<&reqwest::Error> {
        match self {
            AppError::Transport(e) => Some(e),
            AppError::WithContext { source, .. } => source.as_transport(),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::RemoteApi(e) => write!(f, "PayPal error: {}", e),
            AppError::Transport(e) => write!(f, "Transport error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::RemoteApi(e) => Some(e),
            AppError::Transport(e) => Some(e),
            AppError::Config(_) => None,
            AppError::WithContext { source, .. } => Some(source.as_ref()),
        }
    }
}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err)
    }
}

impl From<RemoteApiError> for AppError {
    fn from(err: RemoteApiError) -> Self {
        AppError::RemoteApi(err)
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    ///
    /// # Arguments
    ///
    /// * `context` - The context message to add.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    ///
    /// # Arguments
    ///
    /// * `f` - A closure that produces the context message.
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}

/// Extension for std::io::Error, used when reading the credentials file
impl<T> ResultExt<T> for Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::Config(e.to_string())),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::Config(e.to_string())),
            context: f(),
        })
    }
}
