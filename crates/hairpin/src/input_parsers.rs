use std::fs::File;
use std::io::{stdin, BufRead, BufReader, Cursor};
use std::path::Path;

use anyhow::Result;
use paste::paste;

// ============================================================
//  FASTA-like multi-record parser
// ============================================================

/// One request as it appeared in the input, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    /// Header text without the leading '>'.
    pub name: Option<String>,
    /// 1-based line of the sequence (or of the header, if it had none).
    pub line: usize,
    /// The sequence line with surrounding whitespace removed.
    pub raw: String,
}

/// Every non-blank line that is not a '>' header is one sequence. A header
/// names the sequence that follows it; a header without a sequence yields
/// a record with empty text, so the caller can report it as missing input.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<InputRecord>> {
    let mut records = Vec::new();
    let mut pending: Option<(String, usize)> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let lnum = idx + 1;
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some((name, hline)) = pending.take() {
                records.push(InputRecord { name: Some(name), line: hline, raw: String::new() });
            }
            pending = Some((header.trim().to_string(), lnum));
        } else {
            let name = pending.take().map(|(name, _)| name);
            records.push(InputRecord { name, line: lnum, raw: line.to_string() });
        }
    }

    if let Some((name, hline)) = pending {
        records.push(InputRecord { name: Some(name), line: hline, raw: String::new() });
    }
    Ok(records)
}

// ============================================================
//  Macro generating file/string/stdin/input helpers
// ============================================================

/// Generate input adapters for a base parser function `fn base<R: BufRead>(R) -> Result<T>`.
///
/// This expands into:
/// - `base_string(&str)`
/// - `base_file<P: AsRef<Path>>(P)`
/// - `base_stdin()`
/// - `base_input(&str)`  (dispatches "-" → stdin, otherwise → file)
macro_rules! define_input_variants {
    ($base:ident, $ret:ty) => {
        paste! {
            /// Read from a string buffer.
            pub fn [<$base _string>](s: &str) -> $ret {
                $base(Cursor::new(s))
            }

            /// Read from a file path.
            pub fn [<$base _file>]<P: AsRef<Path>>(path: P) -> $ret {
                let reader = BufReader::new(File::open(path)?);
                $base(reader)
            }

            /// Read from stdin.
            pub fn [<$base _stdin>]() -> $ret {
                let reader = BufReader::new(stdin());
                $base(reader)
            }

            /// Read either from stdin ("-") or a file path.
            pub fn [<$base _input>](s: &str) -> $ret {
                if s == "-" {
                    [<$base _stdin>]()
                } else {
                    [<$base _file>](s)
                }
            }
        }
    };
}

type RecordsResult = Result<Vec<InputRecord>>;

define_input_variants!(read_records, RecordsResult);

// ============================================================
//  Unit tests
// ============================================================
