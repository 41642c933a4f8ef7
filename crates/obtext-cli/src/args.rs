//! Command-line argument definitions for the obtext CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the output format,
//! configuration file selection, and logging verbosity.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

/// Command-line arguments for the obtext document tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input objective text file
    #[arg(help = "Path to the input file (.obt)")]
    pub input: String,

    /// Path to the output file [default: input path with the format's extension]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Markdown)]
    pub format: Format,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Also print the parsed syntax tree to stdout
    #[arg(short, long)]
    pub pretty: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The file the output is written to.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(output) => PathBuf::from(output),
            None => Path::new(&self.input).with_extension(self.format.extension()),
        }
    }
}

/// What the CLI writes.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Markdown rendering of the markup document
    Markdown,
    /// HTML fragment of the markup document
    Html,
    /// Indented dump of the syntax tree
    Syntax,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Markdown => "md",
            Format::Html => "html",
            Format::Syntax => "txt",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["obtext", "notes.obt"]);

        assert_eq!(args.format, Format::Markdown);
        assert!(!args.pretty);
        assert_eq!(args.output_path(), PathBuf::from("notes.md"));
    }

    #[test]
    fn test_output_follows_format() {
        let args = Args::parse_from(["obtext", "docs/notes.obt", "-f", "html"]);
        assert_eq!(args.output_path(), Path::new("docs").join("notes.html"));

        let args = Args::parse_from(["obtext", "notes.obt", "--format", "syntax", "-p"]);
        assert_eq!(args.output_path(), PathBuf::from("notes.txt"));
        assert!(args.pretty);
    }

    #[test]
    fn test_explicit_output() {
        let args = Args::parse_from(["obtext", "notes.obt", "-o", "out/readme.md", "-f", "html"]);
        assert_eq!(args.output_path(), PathBuf::from("out/readme.md"));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Args::try_parse_from(["obtext", "notes.obt", "-f", "pdf"]).is_err());
    }
}
