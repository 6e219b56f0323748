use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use filematch::{build_options, expect, logging, Args, DefaultContext, File, MatcherContext};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logging::init(args.verbose);

    let opts = build_options(&args)?;

    let received_path = args
        .received
        .canonicalize()
        .context("Invalid received path")?;
    let expected_path = args
        .expected
        .canonicalize()
        .context("Invalid expected path")?;

    let expected = File::open(&expected_path).await?;
    // The same path on both sides is one instance, which the matcher rejects.
    let received_file;
    let received = if received_path == expected_path {
        &expected
    } else {
        received_file = File::open(&received_path).await?;
        &received_file
    };

    let context: Arc<dyn MatcherContext> = if opts.color {
        Arc::new(DefaultContext::colored())
    } else {
        Arc::new(DefaultContext::plain())
    };
    let mut expectation = expect(received).with_context(context);
    if opts.negate {
        expectation = expectation.not();
    }

    match expectation
        .to_be_file_with(&expected, &opts.comparison)
        .await
    {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}
