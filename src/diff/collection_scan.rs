//! Line scanner for the changed lines of a composite file.
//!
//! Changed lines are fragments, not a document, so they are scanned tag by
//! tag instead of parsed. An element counts when its collection start tag and
//! its identifier both appear in the lines; the identifier may span lines.

use crate::catalog::{CollectionRelation, CompositeCategory};
use crate::markup::{find_end_tag, find_start_tag, unescape_text};
use tracing::debug;

/// One element found in changed lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionMatch {
    pub relation: &'static CollectionRelation,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Open(&'static CollectionRelation),
    KeyStart,
    Close,
}

/// Scanner state carried across lines.
struct Scanner<'c> {
    composite: &'c CompositeCategory,
    open: Option<&'static CollectionRelation>,
    in_key: bool,
    buffer: String,
    value: Option<String>,
    matches: Vec<CollectionMatch>,
}

impl<'c> Scanner<'c> {
    fn new(composite: &'c CompositeCategory) -> Self {
        Self {
            composite,
            open: None,
            in_key: false,
            buffer: String::new(),
            value: None,
            matches: Vec::new(),
        }
    }

    fn feed(&mut self, line: &str) {
        let mut rest = line;
        loop {
            if self.in_key {
                let Some(relation) = self.open else {
                    return;
                };
                match find_end_tag(rest, relation.field_key) {
                    Some(end) => {
                        self.buffer.push_str(rest[..end.start].trim());
                        self.value = Some(match unescape_text(&self.buffer) {
                            Ok(value) => value,
                            Err(e) => {
                                debug!(error = %e, "Keeping undecoded identifier");
                                self.buffer.clone()
                            }
                        });
                        self.buffer.clear();
                        self.in_key = false;
                        rest = &rest[end.end..];
                    }
                    None => {
                        self.buffer.push_str(rest.trim());
                        return;
                    }
                }
                continue;
            }
            let Some((event, _, end)) = self.next_event(rest) else {
                return;
            };
            match event {
                Event::Open(relation) => {
                    self.flush();
                    self.open = Some(relation);
                }
                Event::KeyStart => {
                    self.in_key = true;
                    self.buffer.clear();
                }
                Event::Close => self.flush(),
            }
            rest = &rest[end..];
        }
    }

    /// Earliest relevant tag in `rest`: a collection start, or, inside an
    /// open element, its identifier start or the element's end tag.
    fn next_event(&self, rest: &str) -> Option<(Event, usize, usize)> {
        let mut best: Option<(Event, usize, usize)> = None;
        let mut consider = |event: Event, start: usize, end: usize| {
            if best.map_or(true, |(_, current, _)| start < current) {
                best = Some((event, start, end));
            }
        };
        for relation in self.composite.collections {
            if let Some(span) = find_start_tag(rest, relation.collection) {
                consider(Event::Open(relation), span.start, span.end);
            }
        }
        if let Some(relation) = self.open {
            if self.value.is_none() {
                if let Some(span) = find_start_tag(rest, relation.field_key) {
                    consider(Event::KeyStart, span.start, span.end);
                }
            }
            if let Some(span) = find_end_tag(rest, relation.collection) {
                consider(Event::Close, span.start, span.end);
            }
        }
        best
    }

    fn flush(&mut self) {
        if let (Some(relation), Some(value)) = (self.open.take(), self.value.take()) {
            if !value.is_empty() {
                self.matches.push(CollectionMatch { relation, value });
            }
        }
        self.in_key = false;
        self.buffer.clear();
    }

    fn finish(mut self) -> Vec<CollectionMatch> {
        self.flush();
        self.matches
    }
}

/// Elements of `composite` identified in `lines`, in order of appearance.
///
/// An element whose end tag falls outside the lines still counts once its
/// identifier was read.
pub fn scan_lines<S: AsRef<str>>(composite: &CompositeCategory, lines: &[S]) -> Vec<CollectionMatch> {
    let mut scanner = Scanner::new(composite);
    for line in lines {
        scanner.feed(line.as_ref());
    }
    scanner.finish()
}
