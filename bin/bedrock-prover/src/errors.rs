use std::fmt;

use bedrock_prover::{ErrorKind, ProverError};

/// Errors displayed to the user when using the CLI
#[derive(Debug)]
pub(crate) enum DisplayedError {
    /// Errors the user can address by fixing configuration or input
    UserError(String, Box<dyn fmt::Debug>),
    /// Failures of the chain endpoints or of the prover itself
    InternalError(String, Box<dyn fmt::Debug>),
}

#[inline]
pub(crate) fn user_error<E>(msg: impl Into<String>) -> impl FnOnce(E) -> DisplayedError
where
    E: fmt::Debug + 'static,
{
    move |e| DisplayedError::UserError(msg.into(), Box::new(e))
}

#[inline]
pub(crate) fn internal_error<E>(msg: impl Into<String>) -> impl FnOnce(E) -> DisplayedError
where
    E: fmt::Debug + 'static,
{
    move |e| DisplayedError::InternalError(msg.into(), Box::new(e))
}

pub(crate) trait DisplayableError {
    type Output;
    fn user_error(self, msg: impl Into<String>) -> Result<Self::Output, DisplayedError>;
    fn internal_error(self, msg: impl Into<String>) -> Result<Self::Output, DisplayedError>;
}

impl<T, E: fmt::Debug + 'static> DisplayableError for Result<T, E> {
    type Output = T;
    #[inline]
    fn user_error(self, msg: impl Into<String>) -> Result<Self::Output, DisplayedError> {
        self.map_err(user_error(msg))
    }
    #[inline]
    fn internal_error(self, msg: impl Into<String>) -> Result<Self::Output, DisplayedError> {
        self.map_err(internal_error(msg))
    }
}

/// Missing or malformed inputs are on the user, everything else is internal.
pub(crate) fn prover_error(msg: impl Into<String>) -> impl FnOnce(ProverError) -> DisplayedError {
    move |e| {
        let msg = format!("{}: {e}", msg.into());
        match e.kind() {
            ErrorKind::NotFound | ErrorKind::Parse => DisplayedError::UserError(msg, Box::new(e)),
            ErrorKind::MalformedRlp | ErrorKind::Rpc | ErrorKind::DeadlineExceeded => {
                DisplayedError::InternalError(msg, Box::new(e))
            }
        }
    }
}

impl fmt::Display for DisplayedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayedError::UserError(msg, e) => {
                f.write_fmt(format_args!("User error: {msg}: {e:?}"))
            }
            DisplayedError::InternalError(msg, e) => {
                f.write_fmt(format_args!("Internal error: {msg}: {e:?}"))
            }
        }
    }
}
