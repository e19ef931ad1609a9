use std::io::{self, Read};

use option_report_core::schema::RawTable;

use super::file::table_from_reader;

/// Attempt to read a CSV register from stdin if data is being piped.
/// Returns None if stdin is a TTY (interactive).
pub fn read_register_stdin() -> Result<Option<RawTable>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    if buffer.trim().is_empty() {
        return Ok(None);
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(buffer.as_bytes());
    table_from_reader(&mut reader).map(Some)
}
