use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("bundled catalog file missing: {0}")]
    MissingAsset(String),

    #[error("bundled catalog file {0} is not valid UTF-8")]
    InvalidUtf8(String),

    #[error("failed to parse {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: toml::de::Error,
    },

    #[error("catalog has no parameters")]
    NoParameters,

    #[error("catalog has no quiz questions")]
    NoQuestions,

    #[error("duplicate parameter id '{0}'")]
    DuplicateParameter(String),

    #[error("duplicate category '{0}'")]
    DuplicateCategory(String),

    #[error("parameter '{parameter}' uses unknown category '{category}'")]
    UnknownCategory { parameter: String, category: String },

    #[error("quiz question {index} answers unknown parameter '{answer}'")]
    UnknownAnswer { index: usize, answer: String },

    #[error("parameter '{parameter}' has an invalid control: {reason}")]
    InvalidControl { parameter: String, reason: String },
}
