use crate::domain::model::Record;
use crate::utils::error::{Result, TaskError};
use std::path::Path;

/// Read records from a CSV file, zipping the header row with each row.
pub fn read_records(path: &str) -> Result<Vec<Record>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut record = Record::new();
        for (name, value) in headers.iter().zip(row.iter()) {
            record.insert(name, value);
        }
        records.push(record);
    }

    Ok(records)
}

/// Read records, falling back to a built-in example set when the file
/// does not exist. A file that exists but fails to parse is still an error.
pub fn read_records_or_examples(path: &str, examples: Vec<Record>) -> Result<Vec<Record>> {
    if !Path::new(path).exists() {
        tracing::info!("Note: {} not found. Using example data instead.", path);
        return Ok(examples);
    }

    let records = read_records(path)?;
    tracing::info!("Loaded {} records from {}", records.len(), path);
    Ok(records)
}

/// Serialize records to CSV bytes with the given column order. Fields a
/// record does not have are written empty.
pub fn to_csv_bytes(headers: &[String], records: &[Record]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;

    for record in records {
        let row: Vec<&str> = headers.iter().map(|h| record.get_or(h, "")).collect();
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| TaskError::ProcessingError {
            message: format!("CSV buffer error: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_records_zips_header_with_rows() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,email").unwrap();
        writeln!(file, "Alice Smith,alice@example.com").unwrap();
        writeln!(file, "Bob Jones,bob@example.com").unwrap();

        let records = read_records(file.path().to_str().unwrap()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("name"), Some("Alice Smith"));
        assert_eq!(records[1].get("email"), Some("bob@example.com"));
    }

    #[test]
    fn test_read_records_missing_file_is_error() {
        assert!(read_records("definitely_not_here.csv").is_err());
    }

    #[test]
    fn test_fallback_to_examples_when_file_absent() {
        let examples = vec![Record::from_pairs([("name", "Alice Smith")])];
        let records =
            read_records_or_examples("definitely_not_here.csv", examples.clone()).unwrap();
        assert_eq!(records, examples);
    }

    #[test]
    fn test_to_csv_bytes_orders_columns_by_header() {
        let headers = vec!["name".to_string(), "email".to_string()];
        let records = vec![
            Record::from_pairs([("email", "alice@example.com"), ("name", "Alice")]),
            Record::from_pairs([("name", "Bob")]),
        ];

        let bytes = to_csv_bytes(&headers, &records).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(text, "name,email\nAlice,alice@example.com\nBob,\n");
    }

    #[test]
    fn test_existing_file_wins_over_examples() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name").unwrap();
        writeln!(file, "From File").unwrap();

        let examples = vec![Record::from_pairs([("name", "From Examples")])];
        let records =
            read_records_or_examples(file.path().to_str().unwrap(), examples).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("name"), Some("From File"));
    }
}
