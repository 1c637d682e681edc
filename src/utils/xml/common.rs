use anyhow::{Result, anyhow};
use quick_xml::{
    Reader, Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};
use std::io::Cursor;

pub type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Elements whose content runs up to their end tag as plain text.
const RAW_TEXT_ELEMENTS: [&[u8]; 4] = [b"script", b"style", b"title", b"textarea"];

#[inline]
pub fn create_xml_reader(content: &[u8]) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(false);
    reader.config_mut().enable_all_checks(false);
    reader.config_mut().allow_dangling_amp = true;
    reader
}

#[inline]
pub fn create_xml_writer(capacity: usize) -> XmlWriter {
    Writer::new(Cursor::new(Vec::with_capacity(capacity)))
}

/// Tag name comparison, ASCII case-insensitive as in HTML.
#[inline]
pub fn is_tag(name: &[u8], tag: &[u8]) -> bool {
    name.eq_ignore_ascii_case(tag)
}

#[inline]
fn is_raw_text_element(name: &[u8]) -> bool {
    RAW_TEXT_ELEMENTS.iter().any(|tag| is_tag(name, tag))
}

/// Event reader for HTML documents.
///
/// The content of `<script>`, `<style>`, `<title>` and `<textarea>` is
/// never parsed as markup: it comes back verbatim as one `Text` event,
/// followed by the element's `End` event.
pub struct HtmlReader<'a> {
    content: &'a [u8],
    /// Start of the current reader's input within `content`
    offset: usize,
    reader: Reader<&'a [u8]>,
    raw_text: Option<&'a [u8]>,
}

impl<'a> HtmlReader<'a> {
    pub fn new(content: &'a [u8]) -> Self {
        Self {
            content,
            offset: 0,
            reader: create_xml_reader(content),
            raw_text: None,
        }
    }

    pub fn read_event(&mut self) -> Result<Event<'a>> {
        if let Some(text) = self.raw_text.take() {
            let text = std::str::from_utf8(text)?;
            return Ok(Event::Text(BytesText::from_escaped(text)));
        }

        let event = self.reader.read_event().map_err(|e| {
            anyhow!(
                "HTML parse error at position {}: {:?}",
                self.offset as u64 + self.reader.error_position(),
                e
            )
        })?;

        if let Event::Start(elem) = &event {
            let name = elem.name();
            if is_raw_text_element(name.as_ref()) {
                self.skip_raw_text(name.as_ref());
            }
        }
        Ok(event)
    }

    /// Move past the raw text of the element just opened, keeping it for the
    /// next call.
    fn skip_raw_text(&mut self, name: &[u8]) {
        let start = self.offset + self.reader.buffer_position() as usize;
        let rest = &self.content[start..];
        let end = start + find_end_tag(rest, name).unwrap_or(rest.len());

        if end > start {
            self.raw_text = Some(&self.content[start..end]);
        }
        self.offset = end;
        self.reader = create_xml_reader(&self.content[end..]);
    }
}

/// Byte offset of the first `</name` end tag in `text`, if any.
fn find_end_tag(text: &[u8], name: &[u8]) -> Option<usize> {
    let mut from = 0;
    while let Some(found) = text[from..].windows(2).position(|w| w == b"</") {
        let at = from + found;
        let after = &text[at + 2..];
        let closes = after.len() >= name.len()
            && is_tag(&after[..name.len()], name)
            && after
                .get(name.len())
                .is_none_or(|&b| b == b'>' || b == b'/' || b.is_ascii_whitespace());
        if closes {
            return Some(at);
        }
        from = at + 2;
    }
    None
}

/// Whether the document contains a `<tag>` element anywhere.
pub fn contains_element(content: &[u8], tag: &[u8]) -> Result<bool> {
    let mut reader = HtmlReader::new(content);
    loop {
        match reader.read_event()? {
            Event::Start(elem) | Event::Empty(elem) if is_tag(elem.name().as_ref(), tag) => {
                return Ok(true);
            }
            Event::Eof => return Ok(false),
            _ => {}
        }
    }
}

/// Write an element whose text is already safe for its context:
/// `<tag attr1="val1" ...>text</tag>`.
///
/// The text is written verbatim (no entity escaping), as required for raw
/// text elements like `<script>`.
pub fn write_raw_text_element(
    writer: &mut XmlWriter,
    tag: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> Result<()> {
    let mut elem = BytesStart::new(tag);
    for (k, v) in attrs {
        elem.push_attribute((*k, *v));
    }
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::Text(BytesText::from_escaped(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
