//! Configuration types for parsing and rendering documents.
//!
//! All types implement [`serde::Deserialize`] with every field defaulted, so
//! a configuration file only needs the settings it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining parser and render settings.
//! - [`ParserConfig`] - Resource limits applied to parsing, validation and binding.
//! - [`RenderConfig`] - Where `@code{lang}{path}` files are read from.
//!
//! # Example
//!
//! ```
//! # use obtext::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.parser().max_depth(), obtext::DEFAULT_MAX_DEPTH);
//! assert!(config.render().code_dir().is_none());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use obtext_parser::{DEFAULT_MAX_DEPTH, Limits};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,

    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    pub fn new(parser: ParserConfig, render: RenderConfig) -> Self {
        Self { parser, render }
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Replace the render configuration.
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }
}

/// Parser settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Deepest object nesting accepted before the input is rejected.
    #[serde(default = "default_max_depth")]
    max_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The [`Limits`] passed to every pipeline stage.
    pub fn limits(&self) -> Limits {
        Limits::new(self.max_depth)
    }
}

/// Render settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    /// Base directory for relative `@code` file paths. Paths are resolved
    /// against the working directory when unset.
    #[serde(default)]
    code_dir: Option<PathBuf>,
}

impl RenderConfig {
    pub fn new(code_dir: Option<PathBuf>) -> Self {
        Self { code_dir }
    }

    pub fn code_dir(&self) -> Option<&Path> {
        self.code_dir.as_deref()
    }

    /// Resolve the path of an embedded code file.
    ///
    /// Absolute paths are returned unchanged.
    pub fn code_path(&self, path: &str) -> PathBuf {
        match &self.code_dir {
            Some(dir) => dir.join(path),
            None => PathBuf::from(path),
        }
    }
}
