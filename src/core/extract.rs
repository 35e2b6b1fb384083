//! Phrase extraction from template files.
//!
//! Files are read line by line and every line is matched against
//! [`PATTERNS`]. Each capture goes through one normalization step
//! ([`PhraseFilter::normalize`]) before it becomes a [`Candidate`].

use std::{fmt, fs, ops::Range, path::Path};

use super::patterns::{MESSAGE_GROUP, PATTERNS};

const QUOTES: &[char] = &['\'', '"'];

/// Captures that are never phrases on their own.
const SENTINELS: &[&str] = &[".", ",", "#"];

/// A phrase found in a source file, with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub phrase: String,
    /// 1-based line number.
    pub line: usize,
    /// Name of the pattern that produced the phrase.
    pub pattern: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadErrorKind {
    Io,
    InvalidUtf8,
}

/// A file or line that could not be read. The scan continues past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadWarning {
    pub file_path: String,
    /// Set when a single line was skipped, unset when the whole file was.
    pub line: Option<usize>,
    pub kind: ReadErrorKind,
    pub error: String,
}

impl fmt::Display for ReadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.file_path, line, self.error),
            None => write!(f, "{}: {}", self.file_path, self.error),
        }
    }
}

/// Candidates and warnings for one file.
#[derive(Debug, Default)]
pub struct FileExtraction {
    pub candidates: Vec<Candidate>,
    pub warnings: Vec<ReadWarning>,
}

/// Turns raw captures into phrases, rejecting sentinels and the module name.
#[derive(Debug, Clone)]
pub struct PhraseFilter {
    module: String,
}

impl PhraseFilter {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
        }
    }

    /// Strip one leading and one trailing quote, then surrounding whitespace.
    ///
    /// Returns `None` when nothing is left or the result is a sentinel.
    pub fn normalize<'a>(&self, raw: &'a str) -> Option<&'a str> {
        let text = raw.strip_prefix(QUOTES).unwrap_or(raw);
        let text = text.strip_suffix(QUOTES).unwrap_or(text).trim();

        if text.is_empty() || SENTINELS.contains(&text) || text == self.module {
            return None;
        }
        Some(text)
    }
}

/// Extract candidates from one file.
///
/// A file that cannot be opened yields a single warning and no candidates.
pub fn extract_file(path: &Path, filter: &PhraseFilter) -> FileExtraction {
    let file_path = path.to_string_lossy();
    match fs::read(path) {
        Ok(bytes) => extract_source(&bytes, &file_path, filter),
        Err(e) => FileExtraction {
            candidates: Vec::new(),
            warnings: vec![ReadWarning {
                file_path: file_path.into_owned(),
                line: None,
                kind: ReadErrorKind::Io,
                error: e.to_string(),
            }],
        },
    }
}

/// Extract candidates from raw file content.
///
/// Lines that are not valid UTF-8 are skipped with a warning.
pub fn extract_source(bytes: &[u8], file_path: &str, filter: &PhraseFilter) -> FileExtraction {
    let mut result = FileExtraction::default();

    for (index, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
        let line_number = index + 1;
        let raw_line = raw_line.strip_suffix(b"\r").unwrap_or(raw_line);

        match std::str::from_utf8(raw_line) {
            Ok(line) => extract_line(line, line_number, filter, &mut result.candidates),
            Err(e) => result.warnings.push(ReadWarning {
                file_path: file_path.to_string(),
                line: Some(line_number),
                kind: ReadErrorKind::InvalidUtf8,
                error: e.to_string(),
            }),
        }
    }

    result
}

/// Run every pattern over one line, in priority order.
///
/// A match that overlaps a span already claimed on this line is skipped, so
/// `{{ 'Save'|trans }}` yields one candidate even though both the tag and the
/// bare filter patterns match it.
pub fn extract_line(
    line: &str,
    line_number: usize,
    filter: &PhraseFilter,
    out: &mut Vec<Candidate>,
) {
    let mut claimed: Vec<Range<usize>> = Vec::new();

    for pattern in PATTERNS.iter() {
        for caps in pattern.regex.captures_iter(line) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let span = whole.range();
            if claimed.iter().any(|c| overlaps(c, &span)) {
                continue;
            }
            claimed.push(span);

            let Some(message) = caps.name(MESSAGE_GROUP) else {
                continue;
            };
            if let Some(phrase) = filter.normalize(message.as_str()) {
                out.push(Candidate {
                    phrase: phrase.to_string(),
                    line: line_number,
                    pattern: pattern.name,
                });
            }
        }
    }
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}
