use std::io::{Result, Write};

use crate::requests::TableId;

pub fn end<W: Write>(w: &mut W) -> Result<()> {
    w.write_all(b"\n")
}

pub fn show_table<W: Write>(w: &mut W, id: &TableId) -> Result<()> {
    write!(w, "{}", id)
}
