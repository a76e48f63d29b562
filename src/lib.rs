pub mod applier;
pub mod cli;
pub mod consumer;
pub mod diagnostic;
pub mod load;
pub mod output;
pub mod rewrite;
pub mod source;

use std::io::Read;

use anyhow::{Context, Result};

use applier::FixItRewriter;
use cli::Args;
use consumer::create_consumer;
use output::{Destination, WriteOutcome, write_fixed_file};
use source::{SourceFile, SourceMap};

/// Run the fix-it applier. Returns the exit code: 0 = fixed or unchanged,
/// 1 = rewriting suppressed due to failures.
pub fn run(args: Args) -> Result<i32> {
    let source = if args.is_stdin() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        SourceFile::from_string(args.input.clone(), input)
    } else {
        SourceFile::from_path(&args.input)?
    };

    let mut sources = SourceMap::new();
    let main_file = sources.add_file(source);

    let diagnostics = load::load_diagnostics(&args.diagnostics, main_file)?;
    if args.debug {
        eprintln!("debug: {} diagnostics loaded", diagnostics.len());
    }

    let consumer = create_consumer(&args.format);
    let mut applier = FixItRewriter::new(&sources, Some(consumer));
    for diag in &diagnostics {
        applier.handle_diagnostic(diag);
    }
    applier.finish();

    if args.debug {
        eprintln!("debug: {} fix-it failures", applier.num_failures());
    }

    let outcome = write_fixed_file(
        applier.rewriter(),
        main_file,
        applier.num_failures(),
        &args.input,
        args.output.as_deref(),
    )?;

    if args.debug {
        if let WriteOutcome::Written(Destination::File(ref path)) = outcome {
            eprintln!("debug: wrote {}", path.display());
        }
    }

    match outcome {
        WriteOutcome::Suppressed(_) => Ok(1),
        WriteOutcome::Unchanged | WriteOutcome::Written(_) => Ok(0),
    }
}
