use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the `unparse` commands.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read input {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse AST from {path}: {source}")]
    ParseAst {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Codegen(#[from] ecma_unparse::CodegenError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_path() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::ParseAst {
            path: PathBuf::from("tree.json"),
            source,
        };
        assert!(err.to_string().starts_with("Failed to parse AST from tree.json"));
    }

    #[test]
    fn test_codegen_error_is_transparent() {
        let err = Error::from(ecma_unparse::CodegenError::UnsafeTemplate { raw: "é".to_string() });
        assert_eq!(
            err.to_string(),
            ecma_unparse::CodegenError::UnsafeTemplate { raw: "é".to_string() }.to_string()
        );
    }
}
