use serde::Deserialize;

use crate::error::OptionsError;

/// Knobs of the output side of the formatter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputOptions {
    /// Prefixes that mark an emission as a comment. Comments only keep blank lines that were in
    /// the source and ignore recorded suppressions.
    pub comment_markers: Vec<String>,
    /// Width handed to comment rewriting.
    pub max_width: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            comment_markers: vec!["//".to_string(), "/*".to_string()],
            max_width: 100,
        }
    }
}

impl OutputOptions {
    pub fn from_toml_str(text: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(text)?)
    }

    pub fn is_comment(&self, text: &str) -> bool {
        self.comment_markers
            .iter()
            .any(|marker| !marker.is_empty() && text.starts_with(marker.as_str()))
    }
}
