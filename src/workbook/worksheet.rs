//! Worksheet parts: cell values and style indices into a [`Sheet`] grid.

use super::shared_strings::parse_string_item;
use super::xml::{attr_value, read_text, reader};
use crate::error::{Error, Result};
use crate::sheet::{Cell, CellValue, Sheet};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Lookup tables a worksheet refers into.
pub(crate) struct SheetContext<'a> {
    pub(crate) shared_strings: &'a [CellValue],
    pub(crate) indents: &'a [u32],
}

/// Parse worksheet XML into a sheet named `name`.
pub(crate) fn parse_worksheet(xml: &str, name: &str, ctx: &SheetContext<'_>) -> Result<Sheet> {
    let mut reader = reader(xml);
    let mut buf = Vec::new();
    let mut sheet = Sheet::new(name);
    let mut row: u32 = 0;
    let mut next_col: u32 = 1;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"row" => {
                row = attr_value(&e, b"r")?
                    .and_then(|r| r.parse().ok())
                    .unwrap_or(row + 1);
                next_col = 1;
            }
            Event::Start(e) if e.local_name().as_ref() == b"c" => {
                let head = CellHead::read(&e, row, next_col)?;
                let body = read_cell_body(&mut reader)?;
                next_col = head.col + 1;
                sheet.set(head.row, head.col, head.into_cell(body, ctx));
            }
            Event::Empty(e) if e.local_name().as_ref() == b"c" => {
                let head = CellHead::read(&e, row, next_col)?;
                next_col = head.col + 1;
                sheet.set(head.row, head.col, head.into_cell(CellBody::default(), ctx));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheet)
}

struct CellHead {
    row: u32,
    col: u32,
    kind: Option<String>,
    style: usize,
}

#[derive(Default)]
struct CellBody {
    value: Option<String>,
    inline: Option<CellValue>,
}

impl CellHead {
    fn read(e: &BytesStart<'_>, row: u32, next_col: u32) -> Result<Self> {
        let (row, col) = attr_value(e, b"r")?
            .and_then(|r| parse_cell_ref(&r))
            .unwrap_or((row, next_col));
        Ok(Self {
            row,
            col,
            kind: attr_value(e, b"t")?,
            style: attr_value(e, b"s")?
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
        })
    }

    fn into_cell(self, body: CellBody, ctx: &SheetContext<'_>) -> Cell {
        let raw = body.value.unwrap_or_default();
        let value = match self.kind.as_deref() {
            Some("s") => raw
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|idx| ctx.shared_strings.get(idx).cloned())
                .unwrap_or_default(),
            Some("inlineStr") => body.inline.unwrap_or_default(),
            Some("b") => CellValue::Bool(raw.trim() == "1"),
            Some("str" | "e" | "d") => CellValue::Text(raw),
            _ => parse_number(&raw),
        };
        Cell {
            value,
            indent: ctx.indents.get(self.style).copied().unwrap_or(0),
        }
    }
}

fn read_cell_body(reader: &mut Reader<&[u8]>) -> Result<CellBody> {
    let mut buf = Vec::new();
    let mut body = CellBody::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"v" => {
                body.value = Some(read_text(reader, b"v")?);
            }
            Event::Start(e) if e.local_name().as_ref() == b"is" => {
                body.inline = Some(parse_string_item(reader, b"is")?);
            }
            Event::Start(e) => {
                reader.read_to_end_into(e.name(), &mut Vec::new())?;
            }
            Event::End(e) if e.local_name().as_ref() == b"c" => break,
            Event::Eof => return Err(Error::Malformed("unexpected eof in <c>")),
            _ => {}
        }
        buf.clear();
    }

    Ok(body)
}

/// Numeric cell text: integers stay integers, anything with a fraction or exponent is a float.
fn parse_number(raw: &str) -> CellValue {
    let raw = raw.trim();
    if raw.is_empty() {
        return CellValue::Empty;
    }
    if !raw.contains(['.', 'e', 'E']) {
        if let Ok(n) = raw.parse::<i64>() {
            return CellValue::Integer(n);
        }
    }
    raw.parse::<f64>()
        .map_or_else(|_| CellValue::Text(raw.to_string()), CellValue::Float)
}

/// Split an `A1` reference into 1-based `(row, col)`.
pub(crate) fn parse_cell_ref(reference: &str) -> Option<(u32, u32)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() {
        return None;
    }
    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let n = u32::from(c.to_ascii_uppercase()) - u32::from('A') + 1;
        col = col.checked_mul(26)?.checked_add(n)?;
    }
    let row = digits.parse().ok()?;
    Some((row, col))
}
