//! Markdown rendering of markup documents.

use log::trace;

use obtext_core::semantic::{CaptionedLink, ContentBlock, DualArg, SemNode};

use super::{Markup, RenderError, read_code};
use crate::config::RenderConfig;

/// Render `document` as Markdown.
///
/// # Errors
///
/// Fails if a file embedded with `@code` cannot be read.
pub fn render(document: &SemNode<Markup>, config: &RenderConfig) -> Result<String, RenderError> {
    let mut renderer = MarkdownRenderer {
        config,
        out: String::new(),
    };
    renderer.node(document)?;
    Ok(renderer.out)
}

struct MarkdownRenderer<'a> {
    config: &'a RenderConfig,
    out: String,
}

impl MarkdownRenderer<'_> {
    fn node(&mut self, node: &SemNode<Markup>) -> Result<(), RenderError> {
        match node {
            SemNode::Text(text) => self.out.push_str(text),
            SemNode::Block(block) => self.block(block)?,
            SemNode::Node(markup) => self.markup(markup)?,
        }
        Ok(())
    }

    fn block(&mut self, block: &ContentBlock<Markup>) -> Result<(), RenderError> {
        for element in block.elements() {
            self.node(element)?;
        }
        Ok(())
    }

    fn markup(&mut self, markup: &Markup) -> Result<(), RenderError> {
        match markup {
            Markup::Doc(doc) => self.block(&doc.content)?,
            Markup::Section(section) => self.heading("#", section)?,
            Markup::Subsection(section) => self.heading("##", section)?,
            Markup::Para(para) => {
                self.out.push('\n');
                self.block(&para.content)?;
                self.out.push('\n');
            }
            Markup::Bold(bold) => self.wrapped("**", &bold.content)?,
            Markup::Italic(italic) => self.wrapped("*", &italic.content)?,
            Markup::InlineCode(code) => self.wrapped("`", &code.content)?,
            Markup::Image(image) => {
                self.out.push_str("\n!");
                self.link(image)?;
                self.out.push('\n');
            }
            Markup::Video(video) => {
                self.out.push('\n');
                self.link(video)?;
                self.out.push('\n');
            }
            Markup::Link(link) => self.link(link)?,
            Markup::Code(code) => {
                let source = read_code(self.config, code)?;
                trace!(path = code.second, bytes = source.len(); "Embedding code file");
                let source = source.strip_suffix('\n').unwrap_or(&source);
                self.out
                    .push_str(&format!("\n```{}\n{source}\n```\n", code.first));
            }
            Markup::Itemize(list) => {
                self.out.push('\n');
                for item in &list.items {
                    self.out.push_str(" - ");
                    self.block(item)?;
                    self.out.push('\n');
                }
            }
            Markup::Enumerate(list) => {
                self.out.push('\n');
                for (index, item) in list.items.iter().enumerate() {
                    self.out.push_str(&format!(" {}. ", index + 1));
                    self.block(item)?;
                    self.out.push('\n');
                }
            }
        }
        Ok(())
    }

    fn heading(&mut self, marker: &str, section: &DualArg<Markup>) -> Result<(), RenderError> {
        self.out.push('\n');
        self.out.push_str(marker);
        self.out.push(' ');
        self.block(&section.arg1)?;
        self.out.push('\n');
        self.block(&section.arg2)
    }

    fn wrapped(&mut self, marker: &str, content: &ContentBlock<Markup>) -> Result<(), RenderError> {
        self.out.push_str(marker);
        self.block(content)?;
        self.out.push_str(marker);
        Ok(())
    }

    /// `[caption](target)`
    fn link(&mut self, link: &CaptionedLink<Markup>) -> Result<(), RenderError> {
        self.out.push('[');
        self.block(&link.caption)?;
        self.out.push_str("](");
        self.out.push_str(&link.link);
        self.out.push(')');
        Ok(())
    }
}
