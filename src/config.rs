//! Output configuration.
//!
//! `RenderOptions` controls how the XML text is laid out and can be loaded
//! from a JSON file. `Generator` and `DocType` describe the file header and
//! are carried by the document itself.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Write the `<?xml ...?>` declaration.
    pub xml_declaration: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            xml_declaration: true,
        }
    }
}

impl RenderOptions {
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("read render options {}", path.display()))?;
        let options = serde_json::from_str(&text)
            .with_context(|| format!("parse render options {}", path.display()))?;
        Ok(options)
    }
}

/// The `<generator>` record written at the top of the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generator {
    pub tool: String,
    pub version: String,
    pub format: String,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            tool: "CPN Tools".to_string(),
            version: "4.0.1".to_string(),
            format: "6".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocType {
    pub name: String,
    pub public_id: String,
    pub system_id: String,
}

impl DocType {
    pub const CPN_PUBLIC_ID: &'static str = "-//CPN//DTD CPNXML 1.0//EN";
    pub const CPN_SYSTEM_ID: &'static str = "http://cpntools.org/DTD/6/cpn.dtd";

    pub fn cpn() -> Self {
        Self {
            name: "workspaceElements".to_string(),
            public_id: Self::CPN_PUBLIC_ID.to_string(),
            system_id: Self::CPN_SYSTEM_ID.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let options: RenderOptions = serde_json::from_str(r#"{ "indent": 4 }"#).unwrap();
        assert_eq!(
            options,
            RenderOptions {
                indent: 4,
                xml_declaration: true,
            }
        );
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        fs::write(&path, r#"{ "xml_declaration": false }"#).unwrap();

        let options = RenderOptions::from_json_file(&path).unwrap();
        assert_eq!(options.indent, 2);
        assert!(!options.xml_declaration);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = RenderOptions::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(format!("{:#}", err).contains("/definitely/not/here.json"));
    }
}
