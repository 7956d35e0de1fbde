//! `xl/styles.xml`: alignment indent per cell format.

use super::xml::{attr_value, reader};
use crate::error::Result;
use quick_xml::events::Event;

/// Indent of every `cellXfs` entry, indexed by the cell `s` attribute.
pub(crate) fn parse_cell_indents(xml: &str) -> Result<Vec<u32>> {
    let mut reader = reader(xml);
    let mut buf = Vec::new();
    let mut indents = Vec::new();
    let mut in_cell_xfs = false;
    let mut in_xf = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"cellXfs" => in_cell_xfs = true,
                b"xf" if in_cell_xfs => {
                    indents.push(0);
                    in_xf = true;
                }
                b"alignment" if in_xf => set_indent(&mut indents, &e)?,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"xf" if in_cell_xfs => indents.push(0),
                b"alignment" if in_xf => set_indent(&mut indents, &e)?,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"cellXfs" => in_cell_xfs = false,
                b"xf" => in_xf = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(indents)
}

fn set_indent(indents: &mut [u32], e: &quick_xml::events::BytesStart<'_>) -> Result<()> {
    let indent = attr_value(e, b"indent")?
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(0);
    if let Some(last) = indents.last_mut() {
        *last = indent;
    }
    Ok(())
}
