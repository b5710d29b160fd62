use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

use crate::path::PathSegment;
use crate::token::Token;

// -----------------------------------------------------------------------------
// BindError

/// An error raised while decoding or encoding a value.
///
/// The first mismatch aborts the whole call. When path tracking is enabled,
/// the error is wrapped exactly once in [`BindError::BindingFailure`] with the
/// location where it happened, e.g. `$.babies[1].name`.
///
/// # Examples
///
/// ```
/// use nb_bind::{Binder, BindError};
///
/// let err = Binder::new().from_json::<Vec<u32>>("[1, true]").unwrap_err();
/// assert_eq!(err.path(), Some("$[1]"));
/// assert!(matches!(err.root_cause(), BindError::TokenMismatch { .. }));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    /// The current token does not fit the decode routine chosen for the target.
    #[error("expected {expected}, found {found}")]
    TokenMismatch { expected: &'static str, found: Token },
    /// The target type is unrecognized or misses required binding metadata.
    #[error("cannot bind `{type_path}`: {reason}")]
    TypeError {
        type_path: &'static str,
        reason: Cow<'static, str>,
    },
    /// A string matched no variant of the target enum.
    #[error("`{value}` is not a variant of `{type_path}`")]
    EnumMismatch {
        type_path: &'static str,
        value: String,
    },
    /// The runtime value has no encode classification.
    #[error("no encoding available for `{type_path}`")]
    UnsupportedType { type_path: &'static str },
    /// A key matched no field while unknown keys are rejected.
    #[error("unknown key `{key}` for `{type_path}`")]
    UnknownKey {
        type_path: &'static str,
        key: String,
    },
    /// The token kind fits but the value does not, e.g. a number out of range.
    #[error("invalid value for `{type_path}`: {reason}")]
    InvalidValue {
        type_path: &'static str,
        reason: Cow<'static, str>,
    },
    /// The underlying token stream is malformed.
    #[error("malformed token stream: {0}")]
    Syntax(String),
    /// Any of the above, tagged with the location it happened at.
    #[error("binding failed at {path}: {source}")]
    BindingFailure {
        path: String,
        #[source]
        source: Box<BindError>,
    },
}

impl BindError {
    #[inline]
    pub(crate) const fn mismatch(expected: &'static str, found: Token) -> Self {
        Self::TokenMismatch { expected, found }
    }

    #[inline]
    pub(crate) fn type_error(type_path: &'static str, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::TypeError {
            type_path,
            reason: reason.into(),
        }
    }

    #[inline]
    pub(crate) fn invalid(type_path: &'static str, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidValue {
            type_path,
            reason: reason.into(),
        }
    }

    /// Tags the error with the current location.
    ///
    /// Nothing happens if tracking is disabled (`path` is `None`) or the error
    /// already carries a location; the innermost location is the precise one.
    pub fn at(self, path: Option<&PathSegment<'_>>) -> Self {
        match (path, self) {
            (_, wrapped @ Self::BindingFailure { .. }) => wrapped,
            (Some(path), source) => Self::BindingFailure {
                path: path.render(),
                source: Box::new(source),
            },
            (None, source) => source,
        }
    }

    /// Returns the rendered location, if the error carries one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::BindingFailure { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Returns the error without its location wrapper.
    pub fn root_cause(&self) -> &BindError {
        match self {
            Self::BindingFailure { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::BindError;
    use crate::path::PathSegment;
    use crate::token::Token;

    #[test]
    fn wraps_once() {
        let root = PathSegment::Root;
        let child = PathSegment::with_name(Some(&root), "Doc", "a");

        let err = BindError::mismatch("STRING", Token::Number).at(child.as_ref());
        assert_eq!(err.path(), Some("$.a"));

        let err = err.at(Some(&root));
        assert_eq!(err.path(), Some("$.a"));
        assert!(matches!(err.root_cause(), BindError::TokenMismatch { .. }));
    }

    #[test]
    fn disabled_tracking_keeps_cause() {
        let err = BindError::type_error("Foo", "no constructor").at(None);
        assert!(err.path().is_none());
        assert_eq!(err.to_string(), "cannot bind `Foo`: no constructor");
    }
}
