use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the `name=soft[:hard]` grammar.
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("invalid ulimit argument: {0}")]
    InvalidArgument(String),
    #[error("invalid ulimit type: {0}")]
    UnknownResource(String),
    #[error("too many limit value arguments - {0}, can only have up to two, `soft[:hard]`")]
    TooManyValues(String),
    #[error("invalid ulimit value {value:?}: {source}")]
    InvalidValue {
        value: String,
        source: std::num::ParseIntError,
    },
}

/// Errors raised while decoding ulimits from any input form.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("{expected} required, found {found}")]
    Type {
        expected: &'static str,
        found: &'static str,
    },
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conversion(String),
}

impl Error {
    pub(crate) fn type_mismatch(expected: &'static str, value: &serde_json::Value) -> Self {
        Error::Type {
            expected,
            found: crate::value::describe(value),
        }
    }
}
