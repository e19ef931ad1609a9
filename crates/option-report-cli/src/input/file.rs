use serde::de::DeserializeOwned;
use std::fs;
use std::io::Read;
use std::path::Path;

use option_report_core::schema::RawTable;

/// Read a CSV grant register into a raw table.
///
/// The engine treats column presence and order as arbitrary, so the reader
/// is flexible: short rows are allowed and padded downstream.
pub fn read_register(path: &str) -> Result<RawTable, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    table_from_reader(&mut reader)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e).into())
}

/// Read a JSON file and deserialise into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let value: T = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(value)
}

/// Drain a CSV reader into headers + string rows.
pub(crate) fn table_from_reader<R: Read>(
    reader: &mut csv::Reader<R>,
) -> Result<RawTable, Box<dyn std::error::Error>> {
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::new(headers, rows))
}

/// Resolve and validate the path, preventing directory traversal.
fn resolve_path(path: &str) -> Result<std::path::PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use option_report_core::schema::normalize_register;
    use rust_decimal_macros::dec;

    fn reader(data: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(data.as_bytes())
    }

    #[test]
    fn test_table_from_reader_roundtrips_into_grant_rows() {
        let data = "Exercise Price,Exercise Price Currency,Outstanding,Exercisable\n\
                    10.5,EUR,1000,400\n\
                    ,,250,0\n";
        let table = table_from_reader(&mut reader(data)).unwrap();
        assert_eq!(table.row_count(), 2);

        let rows = normalize_register(&table).unwrap();
        assert_eq!(rows[0].exercise_price, Some(dec!(10.5)));
        assert_eq!(rows[0].exercise_price_currency, "EUR");
        assert_eq!(rows[1].exercise_price, None);
        assert_eq!(rows[1].outstanding, dec!(250));
    }

    #[test]
    fn test_table_from_reader_allows_short_rows() {
        let data = "Exercise Price,Outstanding\n5\n";
        let table = table_from_reader(&mut reader(data)).unwrap();
        let rows = normalize_register(&table).unwrap();
        assert_eq!(rows[0].exercise_price, Some(dec!(5)));
        assert_eq!(rows[0].outstanding, dec!(0));
    }
}
