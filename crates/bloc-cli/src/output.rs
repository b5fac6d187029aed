//! Diagnostic printing and output files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bloc_compiler::CompileResult;
use bloc_types::Diagnostics;
use serde::Serialize;

pub const TOOLBOX_FILE: &str = "toolbox.json";
pub const BLOCKS_FILE: &str = "blocks.json";
pub const VOCAB_FILE: &str = "vocab.json";
pub const REFERENCE_FILE: &str = "vocab.txt";

/// Print every diagnostic to stderr, then a summary line if anything was
/// dropped past the error cap.
pub fn report(diagnostics: &Diagnostics) {
    for error in &diagnostics.errors {
        eprintln!("{error}");
    }
    for warning in &diagnostics.warnings {
        eprintln!("{warning}");
    }
    let shown = diagnostics.errors.len();
    if diagnostics.total_errors > shown {
        eprintln!("... and {} more errors", diagnostics.total_errors - shown);
    }
}

/// Write the compiled artifacts into `dir`, returning the paths written.
///
/// Nothing is written when the document itself failed to parse.
pub fn write_outputs(dir: &Path, result: &CompileResult) -> io::Result<Vec<PathBuf>> {
    let Some(toolbox) = &result.toolbox else {
        return Ok(Vec::new());
    };

    fs::create_dir_all(dir)?;
    let mut written = vec![
        write_json(&dir.join(TOOLBOX_FILE), toolbox)?,
        write_json(&dir.join(BLOCKS_FILE), &result.blocks)?,
    ];
    if let Some(vocab) = &result.vocab {
        written.push(write_json(&dir.join(VOCAB_FILE), vocab)?);
        let path = dir.join(REFERENCE_FILE);
        fs::write(&path, vocab.to_reference())?;
        written.push(path);
    }
    Ok(written)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> io::Result<PathBuf> {
    let mut text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    text.push('\n');
    fs::write(path, text)?;
    Ok(path.to_path_buf())
}
