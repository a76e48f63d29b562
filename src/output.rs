//! Final materialization of the fixed file. The single global gate lives
//! here: any recorded failure suppresses all output, so a half-corrected
//! file is never written.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::STDIN_SENTINEL;
use crate::rewrite::Rewriter;
use crate::source::FileId;

/// Where the fixed text ended up, or why nothing was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Rewriting suppressed: this many diagnostics failed.
    Suppressed(usize),
    /// The main file has no applied edits; no output was produced.
    Unchanged,
    /// Fixed text written to the given destination.
    Written(Destination),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

/// Derive the sibling output path: `foo.c` becomes `foo.fixit.c`, an
/// extensionless `foo` becomes `foo.fixit`.
pub fn fixit_path(input: &Path) -> PathBuf {
    match input.extension() {
        Some(ext) => input.with_extension(format!("fixit.{}", ext.to_string_lossy())),
        None => input.with_extension("fixit"),
    }
}

pub fn write_fixed_file(
    rewrite: &Rewriter<'_>,
    main_file: FileId,
    num_failures: usize,
    input: &Path,
    output: Option<&Path>,
) -> Result<WriteOutcome> {
    if num_failures > 0 {
        eprintln!("{num_failures} fix-it failures detected; code will not be modified");
        return Ok(WriteOutcome::Suppressed(num_failures));
    }

    let Some(buffer) = rewrite.buffer_for(main_file).filter(|b| b.has_edits()) else {
        eprintln!("{} is unchanged", input.display());
        return Ok(WriteOutcome::Unchanged);
    };
    let rendered = buffer.render();

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            Ok(WriteOutcome::Written(Destination::File(path.to_path_buf())))
        }
        None if input.as_os_str() == STDIN_SENTINEL => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(&rendered).context("failed to write stdout")?;
            lock.flush().context("failed to flush stdout")?;
            Ok(WriteOutcome::Written(Destination::Stdout))
        }
        None => {
            let path = fixit_path(input);
            std::fs::write(&path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            Ok(WriteOutcome::Written(Destination::File(path)))
        }
    }
}
