// Raw-data CSV export. Column order and header names match the exports the
// quality team already imports into spreadsheets.

use crate::models::{Column, MeasurementRecord};
use std::io::{self, Write};

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write one row, quoting fields that contain separators, quotes or line breaks.
pub fn write_row<W: Write, S: AsRef<str>>(w: &mut W, row: &[S]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first {
            w.write_all(b",")?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\r\n")
}

pub fn header() -> Vec<&'static str> {
    Column::ALL.iter().map(|c| c.header()).collect()
}

/// Header plus one row per record, unset fields written as `---`.
pub fn write_csv<W: Write>(w: &mut W, records: &[MeasurementRecord]) -> io::Result<()> {
    write_row(w, &header())?;
    for record in records {
        write_row(w, &record.to_row())?;
    }
    Ok(())
}

pub fn to_csv_string(records: &[MeasurementRecord]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_csv(&mut buf, records);
    String::from_utf8_lossy(&buf).into_owned()
}
