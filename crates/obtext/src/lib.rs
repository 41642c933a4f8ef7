//! Obtext - objective text, a brace-delimited, object-tagged markup notation.
//!
//! Parsing, validation, binding and rendering of objective text documents.
//! Documents are trees of named objects with `{...}` arguments:
//!
//! ```text
//! @doc{
//!     @section{Objective text}{
//!         @para{Objects look like @bold{this}. Write \@ for a literal at sign.}
//!     }
//! }
//! ```
//!
//! [`DocumentBuilder`] runs the whole pipeline for the default [`markup`]
//! language, and also exposes each stage for custom rule tables and
//! catalogues.

pub mod config;
pub mod markup;

mod error;

pub use obtext_core::{format, scalar, semantic, syntax};
pub use obtext_parser::{DEFAULT_MAX_DEPTH, Limits, ParseError, Span};

pub use error::ObtextError;
pub use markup::OutputFormat;

use log::{debug, info, trace};

use obtext_parser::{bind::Catalogue, constraint::Rules};

use config::AppConfig;
use markup::Markup;
use semantic::SemNode;
use syntax::Object;

/// Builder for parsing and rendering objective text documents.
///
/// # Examples
///
/// ```rust
/// use obtext::{DocumentBuilder, OutputFormat, config::AppConfig};
///
/// let source = "@doc{@section{Hello}{@para{Some @bold{bold} text.}}}";
///
/// // With custom config
/// let config = AppConfig::default();
/// let builder = DocumentBuilder::new(config);
///
/// // Parse, validate and bind against the markup catalogue
/// let document = builder.parse_markup(source)
///     .expect("Failed to parse");
///
/// // Render the bound document
/// let markdown = builder.render(&document, OutputFormat::Markdown)
///     .expect("Failed to render");
/// assert!(markdown.contains("# Hello"));
///
/// // Or use default config
/// let builder = DocumentBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    config: AppConfig,
}

impl DocumentBuilder {
    /// Create a new document builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source bytes into a syntax tree.
    ///
    /// # Errors
    ///
    /// Returns [`ObtextError::Parse`] for malformed input, carrying the
    /// source so diagnostics can be shown in context.
    pub fn parse(&self, source: impl AsRef<[u8]>) -> Result<Object, ObtextError> {
        let source = source.as_ref();
        info!(bytes = source.len(); "Parsing document");

        let tree = obtext_parser::parse(source, &self.config.parser().limits()).map_err(|err| {
            ObtextError::new_parse_error(err, String::from_utf8_lossy(source))
        })?;

        debug!(root = tree.name(); "Document parsed successfully");
        trace!(tree:?; "Parsed syntax tree");
        Ok(tree)
    }

    /// Validate `tree` against `rules`, recording cast values on success.
    ///
    /// # Errors
    ///
    /// Returns [`ObtextError::Document`] for unknown objects, argument count
    /// violations and failed casts.
    pub fn validate(&self, tree: &mut Object, rules: &Rules) -> Result<(), ObtextError> {
        obtext_parser::validate::validate(tree, rules, &self.config.parser().limits())?;
        Ok(())
    }

    /// Bind `tree` against `catalogue`.
    ///
    /// # Errors
    ///
    /// Returns [`ObtextError::Document`] for unknown objects and violated
    /// argument contracts.
    pub fn bind<N>(
        &self,
        tree: &Object,
        catalogue: &Catalogue<N>,
    ) -> Result<SemNode<N>, ObtextError> {
        let document = obtext_parser::bind::bind(tree, catalogue, &self.config.parser().limits())?;
        Ok(document)
    }

    /// Validate and bind `tree` as a [`Markup`] document.
    pub fn markup(&self, mut tree: Object) -> Result<SemNode<Markup>, ObtextError> {
        self.validate(&mut tree, &markup::rules())?;
        let catalogue = markup::catalogue()?;
        let document = self.bind(&tree, &catalogue)?;

        debug!(tags = catalogue.len(); "Markup document bound");
        Ok(document)
    }

    /// Parse, validate and bind `source` as a [`Markup`] document.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use obtext::DocumentBuilder;
    ///
    /// let builder = DocumentBuilder::default();
    /// let err = builder.parse_markup("@img{caption}").unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "error[E101]: object `@img`: expected exactly 2 arguments, found 1"
    /// );
    /// ```
    pub fn parse_markup(&self, source: impl AsRef<[u8]>) -> Result<SemNode<Markup>, ObtextError> {
        let tree = self.parse(source)?;
        self.markup(tree)
    }

    /// Render a bound markup document.
    ///
    /// # Errors
    ///
    /// Returns [`ObtextError::Render`] if an embedded code file cannot be read.
    pub fn render(
        &self,
        document: &SemNode<Markup>,
        format: OutputFormat,
    ) -> Result<String, ObtextError> {
        info!(format:?; "Rendering document");

        let render = self.config.render();
        let output = match format {
            OutputFormat::Markdown => markup::markdown::render(document, render)?,
            OutputFormat::Html => markup::html::render(document, render)?,
        };

        info!(bytes = output.len(); "Document rendered successfully");
        Ok(output)
    }

    /// Dump a syntax tree in the indented plain format.
    pub fn render_syntax(&self, tree: &Object) -> String {
        format::format_syntax(tree)
    }
}
