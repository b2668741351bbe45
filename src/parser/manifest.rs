use crate::models::ManifestEntry;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Element name that references a resource file
pub const FILE_TAG: &str = "file";

/// Manifest markup is not well-formed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}: line {line}, column {column}")]
pub struct ParseError {
    pub message: String,
    /// 1-based line of the offending byte
    pub line: usize,
    /// 0-based byte offset within that line
    pub column: usize,
}

impl ParseError {
    fn at(content: &[u8], position: u64, message: impl Into<String>) -> Self {
        let end = usize::try_from(position)
            .unwrap_or(usize::MAX)
            .min(content.len());
        let before = &content[..end];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let column = match before.iter().rposition(|&b| b == b'\n') {
            Some(newline) => end - newline - 1,
            None => end,
        };
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

/// An open element while walking the document
struct Frame {
    name: String,
    /// Index into the collected texts when this is a `<file>` element
    slot: Option<usize>,
    /// Set once a child element opens; later text is tail text, not content
    sealed: bool,
}

/// Parse a manifest document and return every `<file>` entry in document order
///
/// `<file>` elements below the root are matched at any depth; the root element
/// itself is never an entry. The entry is the text before the element's first
/// child; elements with no text are skipped. Text is decoded with the encoding
/// named in the XML declaration, UTF-8 when there is none.
///
/// # Example
/// ```
/// use qrc_check::parser::parse_entries;
///
/// let entries = parse_entries("<RCC><qresource><file>a.png</file></qresource></RCC>").unwrap();
/// assert_eq!(entries[0].as_str(), "a.png");
/// ```
pub fn parse_entries(content: impl AsRef<[u8]>) -> Result<Vec<ManifestEntry>, ParseError> {
    let content = content.as_ref();
    let mut reader = Reader::from_reader(content);
    let mut stack: Vec<Frame> = Vec::new();
    let mut texts: Vec<String> = Vec::new();
    let mut seen_root = false;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(ParseError::at(
                    content,
                    reader.error_position() as u64,
                    e.to_string(),
                ))
            }
        };
        let position = reader.buffer_position() as u64;

        match event {
            Event::Start(e) => {
                let name = open_element(content, position, &e, &stack, &mut seen_root)?;
                let is_root = stack.is_empty();
                if let Some(parent) = stack.last_mut() {
                    parent.sealed = true;
                }
                let slot = if !is_root && name == FILE_TAG {
                    texts.push(String::new());
                    Some(texts.len() - 1)
                } else {
                    None
                };
                stack.push(Frame {
                    name,
                    slot,
                    sealed: false,
                });
            }
            Event::Empty(e) => {
                // <file/> has no text and is never an entry
                open_element(content, position, &e, &stack, &mut seen_root)?;
                if let Some(parent) = stack.last_mut() {
                    parent.sealed = true;
                }
            }
            Event::End(_) => {
                if stack.pop().is_none() {
                    return Err(ParseError::at(content, position, "unmatched closing tag"));
                }
            }
            Event::Text(t) => {
                if stack.is_empty() {
                    if t.iter().any(|b| !b.is_ascii_whitespace()) {
                        return Err(ParseError::at(
                            content,
                            position,
                            "text outside the root element",
                        ));
                    }
                    continue;
                }
                let text = t
                    .unescape()
                    .map_err(|e| ParseError::at(content, position, e.to_string()))?;
                append_text(&stack, &mut texts, &text);
            }
            Event::CData(c) => {
                if stack.is_empty() {
                    return Err(ParseError::at(
                        content,
                        position,
                        "CDATA outside the root element",
                    ));
                }
                let raw = c.into_inner();
                let text = reader
                    .decoder()
                    .decode(&raw)
                    .map_err(|e| ParseError::at(content, position, e.to_string()))?;
                append_text(&stack, &mut texts, &text);
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes carry no entries
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::at(
            content,
            content.len() as u64,
            format!("unclosed element <{}>", open.name),
        ));
    }
    if !seen_root {
        return Err(ParseError::at(
            content,
            content.len() as u64,
            "no element found",
        ));
    }

    Ok(texts
        .into_iter()
        .filter(|text| !text.is_empty())
        .map(ManifestEntry::new)
        .collect())
}

/// Check an opening tag and return its name
fn open_element(
    content: &[u8],
    position: u64,
    element: &BytesStart<'_>,
    stack: &[Frame],
    seen_root: &mut bool,
) -> Result<String, ParseError> {
    if stack.is_empty() {
        if *seen_root {
            return Err(ParseError::at(
                content,
                position,
                "junk after document element",
            ));
        }
        *seen_root = true;
    }

    for attr in element.attributes() {
        if let Err(e) = attr {
            return Err(ParseError::at(content, position, e.to_string()));
        }
    }

    Ok(String::from_utf8_lossy(element.name().as_ref()).into_owned())
}

fn append_text(stack: &[Frame], texts: &mut [String], text: &str) {
    if let Some(Frame {
        slot: Some(index),
        sealed: false,
        ..
    }) = stack.last()
    {
        texts[*index].push_str(text);
    }
}
