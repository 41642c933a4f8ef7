//! Example: Creating a document from the semantic model
//!
//! This example demonstrates how to build a markup document directly from
//! the semantic types, without parsing source text, and render it.

use obtext::{
    DocumentBuilder, OutputFormat,
    markup::Markup,
    semantic::{CaptionedLink, ContentBlock, DualArg, ListArg, SemNode, SingleArg},
};

fn text(value: &str) -> SemNode<Markup> {
    SemNode::Text(value.to_string())
}

fn block(elements: Vec<SemNode<Markup>>) -> ContentBlock<Markup> {
    ContentBlock::new(elements)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building document from semantic model...\n");

    let paragraph = Markup::Para(SingleArg {
        content: block(vec![
            text("Objective text is built from "),
            SemNode::Node(Markup::Bold(SingleArg {
                content: block(vec![text("objects")]),
            })),
            text(". See "),
            SemNode::Node(Markup::Link(CaptionedLink {
                caption: block(vec![text("the notation")]),
                link: "https://example.com/obtext".to_string(),
            })),
            text("."),
        ]),
    });

    let list = Markup::Itemize(ListArg {
        items: vec![
            block(vec![text("parse")]),
            block(vec![text("validate")]),
            block(vec![text("bind")]),
        ],
    });

    let section = Markup::Section(DualArg {
        arg1: block(vec![text("Introduction")]),
        arg2: block(vec![SemNode::Node(paragraph), SemNode::Node(list)]),
    });

    let document = SemNode::Node(Markup::Doc(SingleArg {
        content: block(vec![SemNode::Node(section)]),
    }));

    let builder = DocumentBuilder::default();

    let markdown = builder.render(&document, OutputFormat::Markdown)?;
    println!("Markdown:\n{markdown}");

    let html = builder.render(&document, OutputFormat::Html)?;
    println!("HTML:\n{html}");

    Ok(())
}
