//! Errors raised while resolving, generating or persisting a board

use std::path::PathBuf;

/// Everything that can go wrong between a settings file and generated SKiDL text
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A selection label that no option table knows about
    #[error("unknown option value for '{key}': '{value}'")]
    UnknownOption { key: &'static str, value: String },

    /// A form field holding the wrong kind of value
    #[error("field '{key}' must be {expected}")]
    InvalidField {
        key: &'static str,
        expected: &'static str,
    },

    /// A field name that is not part of the settings schema
    #[error("unknown field '{key}'")]
    UnknownField { key: String },

    /// A fragment references an identifier that no earlier fragment defines
    #[error("fragment '{fragment}' references '{identifier}' before it is defined")]
    UndefinedReference {
        fragment: &'static str,
        identifier: &'static str,
    },

    /// Two fragments define the same identifier
    #[error("fragment '{fragment}' redefines '{identifier}'")]
    DuplicateDefinition {
        fragment: &'static str,
        identifier: &'static str,
    },

    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings file {}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn unknown(key: &'static str, value: &str) -> Self {
        Error::UnknownOption {
            key,
            value: value.to_string(),
        }
    }
}
