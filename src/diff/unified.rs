//! Unified diff text (`git diff` output) to change records.
//!
//! Only reads text that was already produced; no tool is invoked here.

use super::record::{ChangeMode, DiffRecord};
use regex::Regex;
use std::sync::OnceLock;

/// `diff --git a/<path> b/<path>`, either side optionally C-quoted
/// (`"a/Dise\303\261o.layout-meta.xml"`).
fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"^diff --git (?:"a/(?:[^"\\]|\\.)*"|a/.+?) (?:"b/(?P<quoted>(?:[^"\\]|\\.)*)"|b/(?P<plain>.+))$"#,
        )
        .expect("valid diff header pattern")
    })
}

fn hunk_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^@@ -\d+(?:,\d+)? \+\d+(?:,\d+)? @@").expect("valid hunk pattern")
    })
}

/// Split unified diff text into one record per file.
///
/// Renames produce a delete record for the old path and a new record for
/// the new one. Quoted paths are unescaped.
pub fn parse_unified_diff(text: &str) -> Vec<DiffRecord> {
    let mut records = Vec::new();
    let mut current: Option<DiffRecord> = None;
    let mut in_hunk = false;

    for line in text.lines() {
        if line.starts_with("diff ") {
            records.extend(current.take());
            in_hunk = false;
            current = header_path(line).map(|path| DiffRecord::new(path, ChangeMode::Edit));
            continue;
        }
        let Some(record) = current.as_mut() else {
            continue;
        };
        if hunk_pattern().is_match(line) {
            in_hunk = true;
            continue;
        }
        if in_hunk {
            if let Some(added) = line.strip_prefix('+') {
                record.added_lines.push(added.to_string());
            } else if let Some(removed) = line.strip_prefix('-') {
                record.removed_lines.push(removed.to_string());
            }
            continue;
        }
        if line.starts_with("new file mode") {
            record.mode = ChangeMode::New;
        } else if line.starts_with("deleted file mode") {
            record.mode = ChangeMode::Delete;
        } else if let Some(from) = line.strip_prefix("rename from ") {
            records.push(DiffRecord::new(unquote(from), ChangeMode::Delete));
            record.mode = ChangeMode::New;
        } else if let Some(to) = line.strip_prefix("rename to ") {
            record.path = unquote(to);
        } else if let Some(old) = line.strip_prefix("--- ") {
            if record.mode == ChangeMode::Delete {
                let old = unquote(old);
                if let Some(path) = old.strip_prefix("a/") {
                    record.path = path.to_string();
                }
            }
        }
    }
    records.extend(current);
    records
}

/// New-side path of a `diff --git` header.
fn header_path(line: &str) -> Option<String> {
    let captures = header_pattern().captures(line)?;
    if let Some(quoted) = captures.name("quoted") {
        return Some(unescape_c(quoted.as_str()));
    }
    captures.name("plain").map(|plain| plain.as_str().to_string())
}

/// Strip git's C-style quoting from a path, if present.
fn unquote(path: &str) -> String {
    match path
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => unescape_c(inner),
        None => path.to_string(),
    }
}

/// Decode C escapes (`\303\261`, `\t`, `\"`, `\\`) into UTF-8 text.
fn unescape_c(text: &str) -> String {
    let mut bytes = Vec::with_capacity(text.len());
    let mut input = text.bytes().peekable();
    while let Some(byte) = input.next() {
        if byte != b'\\' {
            bytes.push(byte);
            continue;
        }
        match input.next() {
            Some(digit @ b'0'..=b'7') => {
                let mut value = u32::from(digit - b'0');
                for _ in 0..2 {
                    match input.peek() {
                        Some(next @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(next - b'0');
                            input.next();
                        }
                        _ => break,
                    }
                }
                bytes.push((value & 0xff) as u8);
            }
            Some(b'n') => bytes.push(b'\n'),
            Some(b't') => bytes.push(b'\t'),
            Some(b'r') => bytes.push(b'\r'),
            Some(b'a') => bytes.push(0x07),
            Some(b'b') => bytes.push(0x08),
            Some(b'f') => bytes.push(0x0c),
            Some(b'v') => bytes.push(0x0b),
            Some(other) => bytes.push(other),
            None => bytes.push(b'\\'),
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}
