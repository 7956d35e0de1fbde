//! Small quick-xml helpers shared by the part parsers.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;

/// Value of the attribute whose local name is `key`, unescaped.
pub(crate) fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        if attr.key.local_name().as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Text content up to the closing tag whose local name is `end`.
pub(crate) fn read_text(reader: &mut Reader<&[u8]>, end: &[u8]) -> Result<String> {
    let mut buf = Vec::new();
    let mut text = String::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => {
                let t: Cow<'_, str> = e.unescape()?;
                text.push_str(&t);
            }
            Event::CData(e) => text.push_str(std::str::from_utf8(&e)?),
            Event::End(e) if e.local_name().as_ref() == end => break,
            Event::Eof => return Err(Error::Malformed("unexpected eof in text element")),
            _ => {}
        }
        buf.clear();
    }
    Ok(text)
}

/// A fresh reader that keeps whitespace inside text nodes.
pub(crate) fn reader(xml: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);
    reader
}
