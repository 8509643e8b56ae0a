//! Line/column splitting for the spreadsheet CSV export.
//!
//! This stage is purely syntactic: it knows about separators and quotes,
//! nothing about what the columns mean. The header row is returned like any
//! other row; [`crate::normalize`] is the one that skips it.

/// Upper bound on rows read from a single feed. Rows past the cap are dropped.
pub const MAX_ROWS: usize = 10_000;

/// Upper bound on columns kept per row. Extra columns are ignored.
pub const MAX_COLUMNS: usize = 32;

const SEPARATOR: char = ',';
const QUOTE: char = '"';

/// One non-blank line of the feed, split into trimmed, unquoted columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRow {
    /// 1-based line number in the raw text.
    pub line: usize,
    pub columns: Vec<String>,
}

/// Splits raw feed text into rows of columns.
///
/// Blank lines are skipped. A separator inside a quoted span (an odd number
/// of quote characters seen so far on the line) does not split, so
/// `"Product, Special"` stays one column. Quoted fields spanning several
/// lines are not supported; each physical line is one row.
#[must_use]
pub fn parse_rows(text: &str) -> Vec<FeedRow> {
    let mut rows = Vec::new();

    for (idx, raw_line) in text.split('\n').enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if rows.len() == MAX_ROWS {
            tracing::warn!(
                max_rows = MAX_ROWS,
                line = idx + 1,
                "feed row limit reached; ignoring remaining lines"
            );
            break;
        }
        rows.push(FeedRow {
            line: idx + 1,
            columns: split_columns(line),
        });
    }

    rows
}

/// Splits one line on separators that sit outside quoted spans.
fn split_columns(line: &str) -> Vec<String> {
    let mut columns = Vec::new();
    let mut in_quotes = false;
    let mut start = 0usize;

    for (pos, c) in line.char_indices() {
        if c == QUOTE {
            in_quotes = !in_quotes;
        } else if c == SEPARATOR && !in_quotes {
            columns.push(clean_column(&line[start..pos]));
            start = pos + c.len_utf8();
            if columns.len() == MAX_COLUMNS {
                return columns;
            }
        }
    }
    columns.push(clean_column(&line[start..]));

    columns
}

/// Trims, strips one layer of enclosing quotes, and collapses `""` to `"`.
fn clean_column(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed.strip_prefix(QUOTE).unwrap_or(trimmed);
    let unquoted = unquoted.strip_suffix(QUOTE).unwrap_or(unquoted);
    unquoted.replace("\"\"", "\"")
}
