//! The default markup language built on objective text.
//!
//! [`Markup`] is a closed set of document nodes: headings, paragraphs,
//! inline styles, media, links, embedded code and lists. [`catalogue`]
//! binds syntax trees to it and [`rules`] validates them beforehand.
//! The [`markdown`] and [`html`] renderers turn a bound document into text.
//!
//! | Tag          | Shape          | Arguments |
//! |--------------|----------------|-----------|
//! | `doc`        | single         | `{content}` |
//! | `section`    | dual           | `{heading}{body}` |
//! | `subsection` | dual           | `{heading}{body}` |
//! | `para`       | single         | `{text}` |
//! | `bold`       | single         | `{text}` |
//! | `italic`     | single         | `{text}` |
//! | `icode`      | single         | `{code}` |
//! | `img`        | captioned link | `{caption}{src}` |
//! | `vid`        | captioned link | `{caption}{src}` |
//! | `link`       | captioned link | `{caption}{href}` |
//! | `code`       | dual string    | `{language}{file}` |
//! | `itemize`    | list           | `{item}...` |
//! | `enumerate`  | list           | `{item}...` |

pub mod html;
pub mod markdown;

use std::{fs, io, path::PathBuf};

use thiserror::Error;

use obtext_core::{
    scalar::ScalarKind,
    semantic::{
        CaptionedLink, ContentBlock, DualArg, DualString, ListArg, SemanticNode, SingleArg,
    },
};
use obtext_parser::{
    ParseError,
    bind::{Catalogue, Prototype},
    constraint::{ArgCount, CastArgs, Rules},
};

use crate::config::RenderConfig;

/// A node of a markup document.
#[derive(Debug, Clone, PartialEq)]
pub enum Markup {
    Doc(SingleArg<Markup>),
    Section(DualArg<Markup>),
    Subsection(DualArg<Markup>),
    Para(SingleArg<Markup>),
    Bold(SingleArg<Markup>),
    Italic(SingleArg<Markup>),
    InlineCode(SingleArg<Markup>),
    Image(CaptionedLink<Markup>),
    Video(CaptionedLink<Markup>),
    Link(CaptionedLink<Markup>),
    /// Language and path of a source file to embed.
    Code(DualString),
    Itemize(ListArg<Markup>),
    Enumerate(ListArg<Markup>),
}

impl SemanticNode for Markup {
    fn tag(&self) -> &str {
        match self {
            Markup::Doc(_) => "doc",
            Markup::Section(_) => "section",
            Markup::Subsection(_) => "subsection",
            Markup::Para(_) => "para",
            Markup::Bold(_) => "bold",
            Markup::Italic(_) => "italic",
            Markup::InlineCode(_) => "icode",
            Markup::Image(_) => "img",
            Markup::Video(_) => "vid",
            Markup::Link(_) => "link",
            Markup::Code(_) => "code",
            Markup::Itemize(_) => "itemize",
            Markup::Enumerate(_) => "enumerate",
        }
    }

    fn blocks(&self) -> Vec<&ContentBlock<Self>> {
        match self {
            Markup::Doc(node)
            | Markup::Para(node)
            | Markup::Bold(node)
            | Markup::Italic(node)
            | Markup::InlineCode(node) => node.blocks(),
            Markup::Section(node) | Markup::Subsection(node) => node.blocks(),
            Markup::Image(node) | Markup::Video(node) | Markup::Link(node) => node.blocks(),
            Markup::Itemize(node) | Markup::Enumerate(node) => node.blocks(),
            Markup::Code(_) => Vec::new(),
        }
    }
}

/// The prototypes for every [`Markup`] node.
///
/// # Errors
///
/// Only fails if the tag table itself is broken, i.e. never for a released
/// build.
pub fn catalogue() -> Result<Catalogue<Markup>, ParseError> {
    Catalogue::new([
        Prototype::single("doc", Markup::Doc),
        Prototype::dual("section", Markup::Section),
        Prototype::dual("subsection", Markup::Subsection),
        Prototype::single("para", Markup::Para),
        Prototype::single("bold", Markup::Bold),
        Prototype::single("italic", Markup::Italic),
        Prototype::single("icode", Markup::InlineCode),
        Prototype::captioned_link("img", Markup::Image),
        Prototype::captioned_link("vid", Markup::Video),
        Prototype::captioned_link("link", Markup::Link),
        Prototype::dual_string("code", Markup::Code),
        Prototype::list("itemize", Markup::Itemize),
        Prototype::list("enumerate", Markup::Enumerate),
    ])
}

/// Validation rules matching [`catalogue`].
///
/// Link targets and code arguments are cast to strings, so a target that
/// is not plain text is reported by validation before binding.
pub fn rules() -> Rules {
    let link = || CastArgs::new([None, Some(ScalarKind::String)]);

    Rules::new()
        .with("doc", ArgCount::Exactly(1))
        .with("section", ArgCount::Exactly(2))
        .with("subsection", ArgCount::Exactly(2))
        .with("para", ArgCount::Exactly(1))
        .with("bold", ArgCount::Exactly(1))
        .with("italic", ArgCount::Exactly(1))
        .with("icode", ArgCount::Exactly(1))
        .with("img", link())
        .with("vid", link())
        .with("link", link())
        .with(
            "code",
            CastArgs::new([Some(ScalarKind::String), Some(ScalarKind::String)]),
        )
        .with("itemize", ArgCount::Any)
        .with("enumerate", ArgCount::Any)
}

/// The output formats a markup document can be rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Html,
}

impl OutputFormat {
    /// File extension for documents in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
        }
    }
}

/// Errors raised while rendering a markup document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read code file `{}`: {source}", .path.display())]
    CodeFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read the file embedded by a `@code` node.
fn read_code(config: &RenderConfig, code: &DualString) -> Result<String, RenderError> {
    let path = config.code_path(&code.second);
    fs::read_to_string(&path).map_err(|source| RenderError::CodeFile { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_cover_every_tag() {
        let catalogue = catalogue().expect("valid catalogue");
        let rules = rules();

        let tags: Vec<_> = catalogue.tags().collect();
        let names: Vec<_> = rules.names().collect();
        assert_eq!(tags, names);
        assert_eq!(tags.len(), 13);
    }

    #[test]
    fn test_tags_match_catalogue() {
        let catalogue = catalogue().expect("valid catalogue");
        let content = || ContentBlock::new(vec![]);

        let nodes = [
            Markup::Doc(SingleArg { content: content() }),
            Markup::Section(DualArg {
                arg1: content(),
                arg2: content(),
            }),
            Markup::Link(CaptionedLink {
                caption: content(),
                link: "https://x".to_string(),
            }),
            Markup::Code(DualString {
                first: "rust".to_string(),
                second: "main.rs".to_string(),
            }),
            Markup::Enumerate(ListArg { items: vec![] }),
        ];

        for node in &nodes {
            assert!(catalogue.get(node.tag()).is_some(), "missing {}", node.tag());
        }
    }

    #[test]
    fn test_code_has_no_blocks() {
        let code = Markup::Code(DualString {
            first: "rust".to_string(),
            second: "main.rs".to_string(),
        });
        assert!(code.blocks().is_empty());

        let section = Markup::Section(DualArg {
            arg1: ContentBlock::new(vec![]),
            arg2: ContentBlock::new(vec![]),
        });
        assert_eq!(section.blocks().len(), 2);
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::default().extension(), "md");
        assert_eq!(OutputFormat::Html.extension(), "html");
    }
}
