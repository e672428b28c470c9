//! Maps recognizer output lines back to batch items.
//!
//! Laia prints one line per manifest entry: the echoed image name followed by
//! the decoded symbols separated by single spaces, e.g.
//! `b-0-line t h e {space} e n d`. Real spaces come out as `{space}`.

use thiserror::Error;

use super::types::BatchItem;

/// Symbol the recognizer emits for a literal space.
pub const SPACE_PLACEHOLDER: &str = "{space}";

/// Failure pairing output lines with items.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorrelationError {
    #[error("expected {expected} output lines, got {actual}")]
    OutputCountMismatch { expected: usize, actual: usize },
}

/// Assigns `items[i].transcription` from line `i` of `raw_output`.
///
/// Trailing blank lines are ignored, as is anything past `items.len()` lines.
/// If there are fewer lines than items, no item is touched.
pub fn correlate(raw_output: &str, items: &mut [BatchItem]) -> Result<(), CorrelationError> {
    let mut lines: Vec<&str> = raw_output.split('\n').collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    if lines.len() < items.len() {
        return Err(CorrelationError::OutputCountMismatch {
            expected: items.len(),
            actual: lines.len(),
        });
    }

    let transcriptions: Vec<String> = items
        .iter()
        .zip(&lines)
        .map(|(item, line)| clean_line(line, item))
        .collect();

    for (item, transcription) in items.iter_mut().zip(transcriptions) {
        item.transcription = Some(transcription);
    }

    Ok(())
}

/// Turns one raw output line into the transcription for `item`.
pub fn clean_line(line: &str, item: &BatchItem) -> String {
    let text = strip_echoed_name(line, item);
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let joined = if is_character_spaced(&tokens) {
        tokens.concat()
    } else {
        tokens.join(" ")
    };

    joined.replace(SPACE_PLACEHOLDER, " ")
}

/// Drops the image name the recognizer prints in front of the symbols.
///
/// The leading token is dropped when it names this item, either by its local
/// file or by the name taken from the URL. The local stem is also removed
/// anywhere else on the line since it cannot occur in real text.
fn strip_echoed_name<'a>(line: &'a str, item: &BatchItem) -> std::borrow::Cow<'a, str> {
    let trimmed = line.trim_start();
    let (first, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));

    let text = if names_item(first, item) { rest } else { line };

    let stem = item.local_stem();
    if !stem.is_empty() && text.contains(stem) {
        std::borrow::Cow::Owned(text.replace(stem, ""))
    } else {
        std::borrow::Cow::Borrowed(text)
    }
}

fn names_item(token: &str, item: &BatchItem) -> bool {
    if token.is_empty() {
        return false;
    }

    let stem = std::path::Path::new(token)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(token);

    [token, stem].iter().any(|candidate| {
        *candidate == item.local_stem()
            || (!item.derived_name.is_empty() && *candidate == item.derived_name)
    })
}

/// True when every token is a single symbol, meaning the recognizer spaced
/// the line out character by character.
fn is_character_spaced(tokens: &[&str]) -> bool {
    tokens
        .iter()
        .all(|token| is_single_symbol(token) || (token.starts_with('{') && token.ends_with('}')))
}

/// One base character, optionally followed by combining marks (`e` + U+0301).
fn is_single_symbol(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next().is_some_and(|base| !is_combining_mark(base)) && chars.all(is_combining_mark)
}

fn is_combining_mark(c: char) -> bool {
    matches!(
        c,
        '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}
