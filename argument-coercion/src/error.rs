//! Coercion errors.
use std::fmt;

use displaydoc::Display;
use thiserror::Error;
use tower::BoxError;

use crate::path::Path;

/// A coercer failed.
///
/// This is recoverable: it is reported through the `on_error` callback, the value that was being
/// coerced is left out of the result and its siblings are coerced as usual.
#[derive(Error, Debug)]
#[error("coercion failed at '{path}': {source}")]
pub struct CoercionError {
    /// Location of the value whose coercer failed.
    pub path: Path,
    /// The error returned by the coercer.
    pub source: BoxError,
}

impl CoercionError {
    /// Consumes the error, returning what the coercer returned.
    pub fn into_source(self) -> BoxError {
        self.source
    }
}

/// Every coercion error reported for the arguments of one field.
#[derive(Debug, Default)]
pub struct CoercionErrors(pub Vec<CoercionError>);

impl fmt::Display for CoercionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut errors = self.0.iter();
        if let Some(first) = errors.next() {
            write!(f, "{first}")?;
        }
        for error in errors {
            write!(f, ", {error}")?;
        }
        Ok(())
    }
}

/// Errors that abort the coercion of a field's arguments.
///
/// Apart from [`ArgumentsError::Rejected`], these denote values that do not match their declared
/// type, which validation should have caught before coercion.
#[derive(Error, Display, Debug)]
#[non_exhaustive]
pub enum ArgumentsError {
    /// expected a list at '{path}', found {found}
    ExpectedList {
        /// Location of the value.
        path: Path,
        /// Kind of the value that was found.
        found: &'static str,
    },

    /// expected an input object at '{path}', found {found}
    ExpectedInputObject {
        /// Location of the value.
        path: Path,
        /// Kind of the value that was found.
        found: &'static str,
    },

    /// input object type '{name}' referenced at '{path}' is not defined
    UnknownInputObject {
        /// Name of the missing type.
        name: String,
        /// Location of the value.
        path: Path,
    },

    /// field '{type_name}.{field_name}' is not defined
    UnknownField {
        /// Parent type of the field.
        type_name: String,
        /// Name of the field.
        field_name: String,
    },

    /// arguments are incorrect: {errors}
    Rejected {
        /// The coercion errors that caused the rejection.
        errors: CoercionErrors,
    },
}

/// Errors while building or amending a [`crate::Schema`].
#[derive(Error, Display, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    /// could not parse schema: {0}
    Parse(String),

    /// type '{0}' is not defined
    UndefinedType(String),

    /// type '{0}' cannot be used as an input type
    NotAnInputType(String),

    /// nothing is defined at '{0}'
    UnknownCoordinate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(path: &[&str], message: &str) -> CoercionError {
        CoercionError {
            path: Path::from_iter(path.iter().copied()),
            source: message.into(),
        }
    }

    #[test]
    fn rejected_lists_every_error() {
        let rejected = ArgumentsError::Rejected {
            errors: CoercionErrors(vec![
                error(&["book", "title"], "too long"),
                error(&["tags"], "unknown tag"),
            ]),
        };
        assert_eq!(
            rejected.to_string(),
            "arguments are incorrect: coercion failed at '/book/title': too long, \
             coercion failed at '/tags': unknown tag"
        );
    }

    #[test]
    fn coercion_error_keeps_its_source() {
        let error = error(&["title"], "hi");
        assert_eq!(
            std::error::Error::source(&error).map(ToString::to_string),
            Some("hi".to_string())
        );
        assert_eq!(error.into_source().to_string(), "hi");
    }
}
