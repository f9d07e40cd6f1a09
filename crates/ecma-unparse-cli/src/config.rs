use ecma_unparse::CodegenOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Rendering configuration read from a `--config` file.
///
/// ```json
/// {"codegen": {"pretty": true, "indent": 4, "hexLargeIntegers": false}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub codegen: CodegenOptions,
}

impl RenderConfig {
    /// Load a config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Turn on pretty mode.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        if pretty {
            self.codegen = self.codegen.with_pretty(true);
        }
        self
    }

    /// Turn on web-safe escaping.
    #[must_use]
    pub fn with_web_safe(mut self, web_safe: bool) -> Self {
        if web_safe {
            self.codegen = self.codegen.with_web_safe(true);
        }
        self
    }

    /// Turn off hexadecimal large integers.
    #[must_use]
    pub fn with_no_hex(mut self, no_hex: bool) -> Self {
        if no_hex {
            self.codegen = self.codegen.with_hex_large_integers(false);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"codegen": {{"indent": 4, "hexLargeIntegers": false}}}}"#).unwrap();

        let config = RenderConfig::load(file.path()).unwrap();
        assert_eq!(config.codegen.indent, 4);
        assert!(!config.codegen.hex_large_integers);
        assert!(!config.codegen.pretty);
    }

    #[test]
    fn test_load_empty_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();
        assert_eq!(RenderConfig::load(file.path()).unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(RenderConfig::load(&missing), Err(Error::ConfigRead { .. })));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        assert!(matches!(RenderConfig::load(&bad), Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_flags_only_override_when_set() {
        let config = RenderConfig {
            codegen: CodegenOptions::default().with_pretty(true),
        };
        let config = config.with_pretty(false).with_web_safe(true).with_no_hex(false);
        assert!(config.codegen.pretty);
        assert!(config.codegen.web_safe);
        assert!(config.codegen.hex_large_integers);
    }
}
