//! On-disk block codec
//!
//! Serializes entries to the journal's plain-text block format and scans a
//! full journal back into entries. A block looks like:
//!
//! ```text
//!
//! ==================================================
//! 2024-06-01 09:15:00
//! Title: Morning run
//! ==================================================
//! Felt great today.
//! ```
//!
//! Blocks are concatenated with no separator beyond the next block's leading
//! delimiter line. Parsing is an explicit line scanner anchored on delimiter
//! lines rather than a regex, so there is no backtracking on large files.
//!
//! Known limitation: a content line exactly equal to the delimiter terminates
//! its block early and the remainder of the file misparses. The format does
//! not escape it (see tests).

use crate::models::Entry;

/// Delimiter line separating block header and body: 50 repeated `=`
pub const DELIMITER: &str = "==================================================";

/// Prefix of the title line inside a block header
const TITLE_PREFIX: &str = "Title: ";

/// Serialize an entry to its on-disk block
///
/// Output is deterministic and always ends with a newline.
pub fn serialize(entry: &Entry) -> String {
    format!(
        "\n{delim}\n{ts}\n{prefix}{title}\n{delim}\n{content}\n",
        delim = DELIMITER,
        ts = entry.timestamp,
        prefix = TITLE_PREFIX,
        title = entry.title,
        content = entry.content,
    )
}

/// Parse a full journal into entries, oldest first
///
/// Regions that do not match the block shape are skipped rather than
/// reported; loading is best-effort recovery, not validation.
pub fn parse(text: &str) -> Vec<Entry> {
    let lines: Vec<&str> = text.lines().collect();
    let mut entries = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i] != DELIMITER {
            i += 1;
            continue;
        }

        // Anchored at an opening delimiter: timestamp line, title line, and a
        // closing delimiter must follow, or this is not a block header.
        let timestamp = match lines.get(i + 1) {
            Some(line) => *line,
            None => break,
        };
        let title = match lines.get(i + 2).and_then(|l| l.strip_prefix(TITLE_PREFIX)) {
            Some(title) => title,
            None => {
                i += 1;
                continue;
            }
        };
        if lines.get(i + 3).copied() != Some(DELIMITER) {
            i += 1;
            continue;
        }

        // Content runs to the next delimiter line or end of input.
        let start = i + 4;
        let end = (start..lines.len())
            .find(|&j| lines[j] == DELIMITER)
            .unwrap_or(lines.len());
        let content = lines[start..end].join("\n");

        entries.push(Entry::from_parts(timestamp, title, content));
        i = end;
    }

    entries
}
