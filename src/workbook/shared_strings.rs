//! `xl/sharedStrings.xml`: the shared string table, rich runs included.

use super::xml::{attr_value, read_text, reader};
use crate::error::{Error, Result};
use crate::sheet::{CellValue, RunFont, TextRun};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Parse every `<si>` item in order.
pub(crate) fn parse_shared_strings(xml: &str) -> Result<Vec<CellValue>> {
    let mut reader = reader(xml);
    let mut buf = Vec::new();
    let mut items = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"si" => {
                items.push(parse_string_item(&mut reader, b"si")?);
            }
            Event::Empty(e) if e.local_name().as_ref() == b"si" => {
                items.push(CellValue::Text(String::new()));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(items)
}

/// Parse the body of a string item (`<si>` or an inline `<is>`) up to its closing tag.
///
/// Items with `<r>` runs become [`CellValue::Rich`]; a bare `<t>` stays plain text. Phonetic
/// guide runs are not part of the displayed string and are skipped.
pub(crate) fn parse_string_item(reader: &mut Reader<&[u8]>, end: &[u8]) -> Result<CellValue> {
    let mut buf = Vec::new();
    let mut runs: Vec<TextRun> = Vec::new();
    let mut rich = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => {
                runs.push(TextRun::plain(read_text(reader, b"t")?));
            }
            Event::Start(e) if e.local_name().as_ref() == b"r" => {
                rich = true;
                runs.push(parse_run(reader)?);
            }
            Event::Start(e) => {
                reader.read_to_end_into(e.name(), &mut Vec::new())?;
            }
            Event::End(e) if e.local_name().as_ref() == end => break,
            Event::Eof => return Err(Error::Malformed("unexpected eof in string item")),
            _ => {}
        }
        buf.clear();
    }

    if rich {
        Ok(CellValue::Rich(runs))
    } else {
        Ok(CellValue::Text(runs.into_iter().map(|run| run.text).collect()))
    }
}

fn parse_run(reader: &mut Reader<&[u8]>) -> Result<TextRun> {
    let mut buf = Vec::new();
    let mut font = None;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"rPr" => {
                font = Some(parse_run_font(reader)?);
            }
            Event::Empty(e) if e.local_name().as_ref() == b"rPr" => {
                font = Some(RunFont::default());
            }
            Event::Start(e) if e.local_name().as_ref() == b"t" => {
                text.push_str(&read_text(reader, b"t")?);
            }
            Event::Start(e) => {
                reader.read_to_end_into(e.name(), &mut Vec::new())?;
            }
            Event::End(e) if e.local_name().as_ref() == b"r" => break,
            Event::Eof => return Err(Error::Malformed("unexpected eof in <r>")),
            _ => {}
        }
        buf.clear();
    }

    Ok(TextRun { text, font })
}

fn parse_run_font(reader: &mut Reader<&[u8]>) -> Result<RunFont> {
    let mut buf = Vec::new();
    let mut font = RunFont::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"vertAlign" => {
                font.superscript = attr_value(&e, b"val")?.as_deref() == Some("superscript");
            }
            Event::End(e) if e.local_name().as_ref() == b"rPr" => break,
            Event::Eof => return Err(Error::Malformed("unexpected eof in <rPr>")),
            _ => {}
        }
        buf.clear();
    }

    Ok(font)
}
