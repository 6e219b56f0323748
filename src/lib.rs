//
// lib.rs
// filematch
//
// Library entry: an async equality assertion for file-like blobs that checks metadata fields and decoded contents and explains mismatches with a diff.
//
// Thales Matheus Mendonça Santos - November 2025
//
// Public crate interface: re-export modules used by the binary and tests.
pub mod cli;
pub mod context;
pub mod error;
pub mod expect;
pub mod file;
pub mod logging;
pub mod matcher;
pub mod mime;
pub mod options;
pub mod reader;
pub mod utils;

pub use cli::{build_options, Args, Options};
pub use context::{DefaultContext, MatcherContext, Value};
pub use error::{AssertionError, OptionsError, ReadError};
pub use expect::{expect, Expectation};
pub use file::{BlobSource, File, FileOptions, LoadEvent};
pub use matcher::{to_be_file, MatcherResult, Received, Verdict};
pub use options::{ComparisonOptions, ContentMode, FileField, ReadStrategy};
pub use reader::read_file;
