//! Program Loader.
//!
//! Programs are plain text: one 32-bit instruction word per line in
//! hexadecimal, with an optional `0x` prefix. Blank lines and everything
//! after a `#` or `//` are ignored. Underscores may be used as digit
//! separators.

use std::fs;
use std::path::Path;

use crate::common::error::LoadError;

/// Parses the text of a hex program into instruction words.
///
/// # Examples
///
/// ```
/// use rvooo_core::sim::loader::parse_program;
///
/// let words = parse_program("0x00500093  # addi x1, x0, 5\n\n00300113\n").unwrap();
/// assert_eq!(words, vec![0x00500093, 0x00300113]);
/// ```
pub fn parse_program(text: &str) -> Result<Vec<u32>, LoadError> {
    let mut words = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw
            .split('#')
            .next()
            .and_then(|s| s.split("//").next())
            .unwrap_or("")
            .trim();
        if line.is_empty() {
            continue;
        }
        let digits = line
            .strip_prefix("0x")
            .or_else(|| line.strip_prefix("0X"))
            .unwrap_or(line)
            .replace('_', "");
        let word = u32::from_str_radix(&digits, 16).map_err(|_| LoadError::BadWord {
            line: idx + 1,
            text: line.to_string(),
        })?;
        words.push(word);
    }
    Ok(words)
}

/// Reads and parses a hex program from disk.
pub fn load_program(path: impl AsRef<Path>) -> Result<Vec<u32>, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_program(&text)
}
