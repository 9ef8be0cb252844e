//! Factory configuration: the CURIE set, loaded from YAML or TOML.
//!
//! YAML:
//! ```yaml
//! curies:
//!   - name: doc
//!     href: "http://docs.example.com/rels/{rel}"
//!     method: GET
//! ```
//!
//! TOML:
//! ```toml
//! [[curies]]
//! name = "doc"
//! href = "http://docs.example.com/rels/{rel}"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HalError, Result};
use crate::link::LinkObject;

/// Configuration for a [`ResourceFactory`](crate::ResourceFactory).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactoryConfig {
    #[serde(default)]
    pub curies: Vec<CurieConfig>,
}

/// One CURIE declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurieConfig {
    pub name: String,
    pub href: String,
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_method() -> String {
    "GET".to_string()
}

impl FactoryConfig {
    /// # Errors
    ///
    /// Returns [`HalError::Config`] if the YAML is malformed.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| HalError::Config(e.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`HalError::Config`] if the TOML is malformed.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| HalError::Config(e.to_string()))
    }

    /// Load a config file, picking the format from its extension
    /// (`.yaml`/`.yml` or `.toml`).
    ///
    /// # Errors
    ///
    /// Returns [`HalError::Io`] if the file cannot be read and
    /// [`HalError::Config`] for an unknown extension or malformed content.
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self> = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str,
            Some("toml") => Self::from_toml_str,
            _ => {
                return Err(HalError::Config(format!(
                    "unsupported config format: {}",
                    path.display()
                )))
            }
        };

        let content = std::fs::read_to_string(path)?;
        parse(&content)
    }

    /// Validated CURIE links in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::InvalidArgument`] for the first CURIE with an
    /// empty name or href.
    pub fn curie_links(&self) -> Result<Vec<LinkObject>> {
        self.curies
            .iter()
            .map(|curie| {
                LinkObject::curie(&curie.name, &curie.href, &curie.method).map_err(HalError::from)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArgumentError;
    use std::io::Write;

    const YAML: &str = r#"
curies:
  - name: doc
    href: "http://docs/{rel}"
  - name: ops
    href: "http://ops/{rel}"
    method: POST
"#;

    const TOML: &str = r#"
[[curies]]
name = "doc"
href = "http://docs/{rel}"
method = "GET"
"#;

    #[test]
    fn parses_yaml_with_default_method() {
        let config = FactoryConfig::from_yaml_str(YAML).unwrap();
        assert_eq!(config.curies.len(), 2);
        assert_eq!(config.curies[0].method, "GET");
        assert_eq!(config.curies[1].method, "POST");
    }

    #[test]
    fn parses_toml() {
        let config = FactoryConfig::from_toml_str(TOML).unwrap();
        assert_eq!(
            config.curies,
            vec![CurieConfig {
                name: "doc".to_string(),
                href: "http://docs/{rel}".to_string(),
                method: "GET".to_string(),
            }]
        );
    }

    #[test]
    fn empty_document_has_no_curies() {
        let config = FactoryConfig::from_toml_str("").unwrap();
        assert!(config.curies.is_empty());
    }

    #[test]
    fn malformed_content_is_a_config_error() {
        let err = FactoryConfig::from_yaml_str("curies: [{name: doc}]").unwrap_err();
        assert!(matches!(err, HalError::Config(_)));
        assert!(err.to_string().contains("href"));
    }

    #[test]
    fn curie_links_are_validated() {
        let config = FactoryConfig {
            curies: vec![CurieConfig {
                name: String::new(),
                href: "http://docs/{rel}".to_string(),
                method: default_method(),
            }],
        };
        let err = config.curie_links().unwrap_err();
        assert!(matches!(
            err,
            HalError::InvalidArgument(ArgumentError::EmptyLinkName)
        ));
    }

    #[test]
    fn load_picks_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("hal.yml");
        std::fs::File::create(&yaml_path)
            .unwrap()
            .write_all(YAML.as_bytes())
            .unwrap();
        assert_eq!(FactoryConfig::load(&yaml_path).unwrap().curies.len(), 2);

        let toml_path = dir.path().join("hal.toml");
        std::fs::write(&toml_path, TOML).unwrap();
        assert_eq!(FactoryConfig::load(&toml_path).unwrap().curies.len(), 1);
    }

    #[test]
    fn load_rejects_unknown_extension_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("hal.json");
        std::fs::write(&json_path, "{}").unwrap();
        assert!(matches!(
            FactoryConfig::load(&json_path).unwrap_err(),
            HalError::Config(_)
        ));

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            FactoryConfig::load(&missing).unwrap_err(),
            HalError::Io(_)
        ));
    }
}
