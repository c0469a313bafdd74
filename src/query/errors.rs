use thiserror::Error;

/// Possible errors when compiling a path expression.
///
/// Evaluation itself is infallible; everything that can go wrong is caught
/// here, at compile time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum QueryError {
    #[error("malformed path expression `{expression}`: {message}")]
    Syntax { expression: String, message: String },

    #[error("trailing input `{remainder}` in path expression `{expression}`")]
    Trailing {
        expression: String,
        remainder: String,
    },

    #[error("wrong number of arguments ({given}) to `{function}`")]
    Arity {
        function: &'static str,
        given: usize,
    },
}
