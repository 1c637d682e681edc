use anyhow::{Result, bail};
use quick_xml::events::Event;

use super::common::{
    HtmlReader, XmlWriter, contains_element, create_xml_writer, is_tag, write_raw_text_element,
};

/// MIME type of embedded linked data.
pub const LD_JSON_MIME: &str = "application/ld+json";

/// Where the linked-data script goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    /// Right after the first `</title>`.
    AfterTitle,
    /// Right before `</head>`.
    HeadEnd,
}

/// Insert one `<script type="application/ld+json">` carrying `json`.
///
/// The script follows the document's first `<title>` element. Documents
/// without a title get it appended to `<head>`. `json` must already be
/// script-safe (see [`crate::jsonld::script_safe`]).
pub fn insert_ld_json(content: &[u8], json: &str) -> Result<Vec<u8>> {
    let anchor = if contains_element(content, b"title")? {
        Anchor::AfterTitle
    } else {
        Anchor::HeadEnd
    };

    let mut reader = HtmlReader::new(content);
    let mut writer = create_xml_writer(content.len() + json.len() + 64);
    let mut inserted = false;

    loop {
        match reader.read_event()? {
            Event::End(elem) if !inserted => {
                let name = elem.name().as_ref().to_vec();
                match anchor {
                    Anchor::AfterTitle if is_tag(&name, b"title") => {
                        writer.write_event(Event::End(elem))?;
                        write_ld_script(&mut writer, json)?;
                        inserted = true;
                    }
                    Anchor::HeadEnd if is_tag(&name, b"head") => {
                        write_ld_script(&mut writer, json)?;
                        writer.write_event(Event::End(elem))?;
                        inserted = true;
                    }
                    _ => writer.write_event(Event::End(elem))?,
                }
            }
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }

    if !inserted {
        bail!("document has neither a <title> nor a <head> element");
    }
    Ok(writer.into_inner().into_inner())
}

fn write_ld_script(writer: &mut XmlWriter, json: &str) -> Result<()> {
    write_raw_text_element(writer, "script", &[("type", LD_JSON_MIME)], json)
}
