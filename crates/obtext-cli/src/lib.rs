//! CLI logic for the obtext document tool.
//!
//! This module contains the core CLI logic: read an objective text file, run
//! it through the markup pipeline and write the rendered output.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Format};

use std::{fs, path::Path};

use log::info;

use obtext::{DocumentBuilder, ObtextError, OutputFormat, config::RenderConfig};

/// Run the obtext CLI application
///
/// # Errors
///
/// Returns `ObtextError` for:
/// - File I/O and configuration errors
/// - Syntax errors
/// - Validation and binding errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), ObtextError> {
    let output_path = args.output_path();
    info!(
        input_path = args.input,
        output_path = output_path.display().to_string(),
        format:? = args.format;
        "Processing document"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;

    // Embedded code paths are relative to the document unless configured.
    if app_config.render().code_dir().is_none()
        && let Some(parent) = Path::new(&args.input).parent()
    {
        let render = RenderConfig::new(Some(parent.to_path_buf()));
        app_config = app_config.with_render(render);
    }

    let source = fs::read(&args.input)?;

    let builder = DocumentBuilder::new(app_config);
    let tree = builder.parse(&source)?;

    if args.pretty {
        println!("{}", builder.render_syntax(&tree));
    }

    let output = match args.format {
        Format::Syntax => builder.render_syntax(&tree),
        Format::Markdown => builder.render(&builder.markup(tree)?, OutputFormat::Markdown)?,
        Format::Html => builder.render(&builder.markup(tree)?, OutputFormat::Html)?,
    };

    fs::write(&output_path, output)?;

    info!(output_file = output_path.display().to_string(); "Output written successfully");

    Ok(())
}
