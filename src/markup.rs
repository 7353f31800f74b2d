//! Markup collaborator
//!
//! Parses metadata XML into a nested element tree and locates start/end
//! tags inside single lines for incremental scanning of diff hunks.

use crate::error::MetadataError;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Parsed markup element. Text content is trimmed and concatenated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupElement {
    pub name: String,
    pub text: String,
    pub children: Vec<MarkupElement>,
}

impl MarkupElement {
    fn new(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// First child element named `name`.
    pub fn child(&self, name: &str) -> Option<&MarkupElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Every child element named `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MarkupElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Text of the first child named `name`, if non-empty.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .map(|child| child.text.as_str())
            .filter(|text| !text.is_empty())
    }
}

/// Parse a markup document and return its root element.
pub fn parse_markup(text: &str) -> Result<MarkupElement, MetadataError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<MarkupElement> = Vec::new();
    let mut root: Option<MarkupElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                stack.push(MarkupElement::new(name));
            }
            Event::Empty(start) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                let element = MarkupElement::new(name);
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = root.or(Some(element)),
                }
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|e| MetadataError::InputShape(format!("markup text: {}", e)))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&value);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    MetadataError::InputShape("markup: unbalanced end tag".to_string())
                })?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = root.or(Some(element)),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(MetadataError::InputShape(
            "markup: unclosed element".to_string(),
        ));
    }
    root.ok_or_else(|| MetadataError::InputShape("markup: no root element".to_string()))
}

/// Byte span of a tag match inside a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSpan {
    pub start: usize,
    pub end: usize,
}

/// Locate `<tag>` or `<tag attr="...">` in `line`. Self-closing tags are ignored.
pub fn find_start_tag(line: &str, tag: &str) -> Option<TagSpan> {
    let needle = format!("<{}", tag);
    let mut offset = 0;
    while let Some(found) = line[offset..].find(&needle) {
        let start = offset + found;
        let after = start + needle.len();
        let rest = &line[after..];
        match rest.chars().next() {
            Some('>') => {
                return Some(TagSpan {
                    start,
                    end: after + 1,
                })
            }
            Some(c) if c.is_whitespace() => {
                if let Some(close) = rest.find('>') {
                    if !rest[..close].ends_with('/') {
                        return Some(TagSpan {
                            start,
                            end: after + close + 1,
                        });
                    }
                }
            }
            _ => {}
        }
        offset = after;
    }
    None
}

/// Locate `</tag>` in `line`.
pub fn find_end_tag(line: &str, tag: &str) -> Option<TagSpan> {
    let needle = format!("</{}", tag);
    let mut offset = 0;
    while let Some(found) = line[offset..].find(&needle) {
        let start = offset + found;
        let after = start + needle.len();
        let rest = &line[after..];
        let trimmed = rest.trim_start();
        if trimmed.starts_with('>') {
            let end = after + (rest.len() - trimmed.len()) + 1;
            return Some(TagSpan { start, end });
        }
        offset = after;
    }
    None
}

/// Decode entity and character references in a text fragment.
pub fn unescape_text(text: &str) -> Result<String, MetadataError> {
    quick_xml::escape::unescape(text)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| MetadataError::InputShape(format!("markup text `{}`: {}", text, e)))
}
