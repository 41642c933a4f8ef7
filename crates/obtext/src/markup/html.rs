//! HTML rendering of markup documents.
//!
//! Block elements start on their own line, indented by one tab per section
//! level. Inline content is written as is. All text and attribute values are
//! escaped.

use log::trace;

use obtext_core::semantic::{CaptionedLink, ContentBlock, DualArg, ListArg, SemNode};

use super::{Markup, RenderError, read_code};
use crate::config::RenderConfig;

/// Render `document` as an HTML fragment.
///
/// # Errors
///
/// Fails if a file embedded with `@code` cannot be read.
pub fn render(document: &SemNode<Markup>, config: &RenderConfig) -> Result<String, RenderError> {
    let mut renderer = HtmlRenderer {
        config,
        out: String::new(),
    };
    renderer.node(document, "")?;
    Ok(renderer.out)
}

/// Escape the characters that are special in HTML text and attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

struct HtmlRenderer<'a> {
    config: &'a RenderConfig,
    out: String,
}

impl HtmlRenderer<'_> {
    fn node(&mut self, node: &SemNode<Markup>, indent: &str) -> Result<(), RenderError> {
        match node {
            SemNode::Text(text) => self.out.push_str(&escape(text)),
            SemNode::Block(block) => self.block(block, indent)?,
            SemNode::Node(markup) => self.markup(markup, indent)?,
        }
        Ok(())
    }

    fn block(&mut self, block: &ContentBlock<Markup>, indent: &str) -> Result<(), RenderError> {
        for element in block.elements() {
            self.node(element, indent)?;
        }
        Ok(())
    }

    /// Content that stays on the current line.
    fn inline(&mut self, block: &ContentBlock<Markup>) -> Result<(), RenderError> {
        self.block(block, "")
    }

    fn markup(&mut self, markup: &Markup, indent: &str) -> Result<(), RenderError> {
        match markup {
            Markup::Doc(doc) => self.block(&doc.content, indent)?,
            Markup::Section(section) => self.heading("h1", section, indent)?,
            Markup::Subsection(section) => self.heading("h2", section, indent)?,
            Markup::Para(para) => {
                self.out.push_str(&format!("\n{indent}<p>"));
                self.inline(&para.content)?;
                self.out.push_str("</p>\n");
            }
            Markup::Bold(bold) => self.element("b", &bold.content)?,
            Markup::Italic(italic) => self.element("i", &italic.content)?,
            Markup::InlineCode(code) => self.element("code", &code.content)?,
            Markup::Image(image) => {
                self.out.push_str(&format!(
                    "\n{indent}<img alt=\"{}\" src=\"{}\"/>\n",
                    escape(&image.caption.plain_text()),
                    escape(&image.link)
                ));
            }
            Markup::Video(video) => {
                self.out.push_str(&format!(
                    "\n{indent}<video src=\"{}\" controls>",
                    escape(&video.link)
                ));
                self.inline(&video.caption)?;
                self.out.push_str("</video>\n");
            }
            Markup::Link(link) => self.anchor(link)?,
            Markup::Code(code) => {
                let source = read_code(self.config, code)?;
                trace!(path = code.second, bytes = source.len(); "Embedding code file");
                self.out.push_str(&format!(
                    "\n{indent}<pre><code class=\"language-{}\">{}</code></pre>\n",
                    escape(&code.first),
                    escape(&source)
                ));
            }
            Markup::Itemize(list) => self.list("ul", list, indent)?,
            Markup::Enumerate(list) => self.list("ol", list, indent)?,
        }
        Ok(())
    }

    fn heading(
        &mut self,
        tag: &str,
        section: &DualArg<Markup>,
        indent: &str,
    ) -> Result<(), RenderError> {
        self.out.push_str(&format!("\n{indent}<{tag}>"));
        self.inline(&section.arg1)?;
        self.out.push_str(&format!("</{tag}>\n"));
        self.block(&section.arg2, &format!("{indent}\t"))
    }

    fn element(&mut self, tag: &str, content: &ContentBlock<Markup>) -> Result<(), RenderError> {
        self.out.push_str(&format!("<{tag}>"));
        self.inline(content)?;
        self.out.push_str(&format!("</{tag}>"));
        Ok(())
    }

    fn anchor(&mut self, link: &CaptionedLink<Markup>) -> Result<(), RenderError> {
        self.out
            .push_str(&format!("<a href=\"{}\">", escape(&link.link)));
        self.inline(&link.caption)?;
        self.out.push_str("</a>");
        Ok(())
    }

    fn list(&mut self, tag: &str, list: &ListArg<Markup>, indent: &str) -> Result<(), RenderError> {
        self.out.push_str(&format!("\n{indent}<{tag}>\n"));
        for item in &list.items {
            self.out.push_str(&format!("{indent}\t<li>"));
            self.inline(item)?;
            self.out.push_str("</li>\n");
        }
        self.out.push_str(&format!("{indent}</{tag}>\n"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentBuilder;

    fn render_html(source: &str) -> String {
        let builder = DocumentBuilder::default();
        let document = builder.parse_markup(source).expect("Failed to build document");
        render(&document, builder.config().render()).expect("Failed to render")
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_sections_indent_their_body() {
        let html = render_html("@doc{@section{Title}{@para{Hello @bold{world}}}}");
        assert_eq!(html, "\n<h1>Title</h1>\n\n\t<p>Hello <b>world</b></p>\n");
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render_html(r#"@para{a < b & "c"}"#);
        assert_eq!(html, "\n<p>a &lt; b &amp; &quot;c&quot;</p>\n");
    }

    #[test]
    fn test_inline_elements() {
        let html = render_html("@para{@italic{a}, @icode{b} and @link{c}{https://c}}");
        assert_eq!(
            html,
            "\n<p><i>a</i>, <code>b</code> and <a href=\"https://c\">c</a></p>\n"
        );
    }

    #[test]
    fn test_media_attributes_are_escaped() {
        let html = render_html(r#"@img{A "cat"}{cat.png?a=1&b=2}"#);
        assert_eq!(
            html,
            "\n<img alt=\"A &quot;cat&quot;\" src=\"cat.png?a=1&amp;b=2\"/>\n"
        );

        let html = render_html("@vid{Demo}{demo.mp4}");
        assert_eq!(html, "\n<video src=\"demo.mp4\" controls>Demo</video>\n");
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            render_html("@itemize{a}{b}"),
            "\n<ul>\n\t<li>a</li>\n\t<li>b</li>\n</ul>\n"
        );
        assert_eq!(
            render_html("@enumerate{one}"),
            "\n<ol>\n\t<li>one</li>\n</ol>\n"
        );
    }

    #[test]
    fn test_embedded_code_is_escaped() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("cmp.rs"), "a < b\n").expect("Failed to write");

        let config = RenderConfig::new(Some(dir.path().to_path_buf()));
        let document = DocumentBuilder::default()
            .parse_markup("@code{rust}{cmp.rs}")
            .expect("Failed to build document");

        let html = render(&document, &config).expect("Failed to render");
        assert_eq!(
            html,
            "\n<pre><code class=\"language-rust\">a &lt; b\n</code></pre>\n"
        );
    }
}
