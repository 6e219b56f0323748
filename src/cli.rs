use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::options::{ComparisonOptions, ContentMode, FileField};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// File under test (received)
    pub received: PathBuf,

    /// Reference file (expected)
    pub expected: PathBuf,

    /// Fields to leave out of the comparison: name, type, size, lastModified
    /// (can be repeated or comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub omit: Vec<String>,

    /// How to read contents: readAsText, readAsArrayBuffer, readAsBinaryString,
    /// readAsDataURL, or false to skip the content check
    #[arg(short, long, default_value = "readAsText")]
    pub content: String,

    /// Assert that the files are NOT equal
    #[arg(long)]
    pub not: bool,

    /// Colorize the failure message
    #[arg(long)]
    pub color: bool,

    /// Log comparison steps to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug)]
pub struct Options {
    pub comparison: ComparisonOptions,
    pub negate: bool,
    pub color: bool,
}

pub fn build_options(args: &Args) -> Result<Options> {
    let omit = args
        .omit
        .iter()
        .map(|s| {
            s.parse::<FileField>()
                .with_context(|| format!("Invalid --omit value: {s}"))
        })
        .collect::<Result<Vec<_>>>()?;
    let content = args
        .content
        .parse::<ContentMode>()
        .with_context(|| format!("Invalid --content value: {}", args.content))?;

    Ok(Options {
        comparison: ComparisonOptions::default()
            .omit_all(omit)
            .content(content),
        negate: args.not,
        color: args.color,
    })
}
