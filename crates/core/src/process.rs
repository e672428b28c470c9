//! Helpers shared by the subprocess-backed collaborators.

use std::path::{Path, PathBuf};
use std::process::Output;

/// Joins a finished process's stdout and stderr into one blob.
///
/// Stdout comes first so line-oriented results stay at the top.
pub(crate) fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&stderr);
    }
    text
}

/// Resolves `program` the way a spawn would, without running it.
///
/// Bare names are searched on `PATH`; anything with a separator must point
/// at an executable file.
pub(crate) fn locate_binary(program: &Path) -> Option<PathBuf> {
    which::which(program).ok()
}
