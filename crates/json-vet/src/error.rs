use thiserror::Error;

/// A defect in the schema document itself.
///
/// These are raised immediately and never mixed into a
/// [`ValidationResult`](crate::ValidationResult): a malformed schema means
/// the caller's configuration is unusable, not that the data is invalid.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("schema node must be a JSON object")]
    NotAnObject,

    #[error("\"enum\" must be an array of candidate values")]
    EnumNotArray,

    #[error("\"{0}\" must be an array of schemas")]
    CombinatorNotArray(&'static str),

    #[error("\"{0}\" divisor must not be zero")]
    ZeroDivisor(&'static str),

    #[error("unknown format \"{0}\"")]
    UnknownFormat(String),

    #[error("unknown schema keyword \"{0}\"")]
    UnknownKeyword(String),

    #[error("invalid regular expression \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("invalid \"type\" specification: expected a type name, a schema, or an array of those")]
    InvalidTypeSpec,

    #[error("\"{keyword}\" expects {expected}")]
    InvalidKeyword {
        keyword: &'static str,
        expected: &'static str,
    },
}
