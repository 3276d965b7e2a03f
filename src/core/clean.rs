use crate::core::{csvio, timestamp_tag};
use crate::domain::model::{OutputFile, Record, TaskOutput, TaskReport};
use crate::domain::ports::{Storage, Task};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct CleanConfig {
    pub input: String,
    pub output_dir: String,
}

/// CSV cleaner: drops fully-blank rows, drops exact duplicate rows and
/// trims whitespace from every field.
pub struct CleanTask<S: Storage> {
    storage: S,
    config: CleanConfig,
    // Header order from the input file, captured during extract so the
    // output keeps the same columns even when every row gets dropped.
    headers: Mutex<Vec<String>>,
}

impl<S: Storage> CleanTask<S> {
    pub fn new(storage: S, config: CleanConfig) -> Self {
        Self {
            storage,
            config,
            headers: Mutex::new(Vec::new()),
        }
    }

    fn header_order(&self) -> Vec<String> {
        self.headers.lock().map(|h| h.clone()).unwrap_or_default()
    }

    fn is_blank(record: &Record) -> bool {
        record.fields.values().all(|v| v.trim().is_empty())
    }
}

#[async_trait]
impl<S: Storage> Task for CleanTask<S> {
    async fn extract(&self) -> Result<Vec<Record>> {
        tracing::info!("Reading file: {}", self.config.input);

        let mut reader = csv::Reader::from_path(&self.config.input)?;
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let mut record = Record::new();
            for (name, value) in headers.iter().zip(row.iter()) {
                record.insert(name, value);
            }
            records.push(record);
        }

        tracing::info!(
            "Loaded {} rows and {} columns",
            records.len(),
            headers.len()
        );
        tracing::info!("Columns: {:?}", headers);

        if let Ok(mut slot) = self.headers.lock() {
            *slot = headers;
        }

        Ok(records)
    }

    async fn transform(&self, rows: Vec<Record>) -> Result<TaskOutput> {
        let headers = self.header_order();
        let input_count = rows.len();

        // Step 1: remove completely empty rows
        let before = rows.len();
        let rows: Vec<Record> = rows.into_iter().filter(|r| !Self::is_blank(r)).collect();
        tracing::info!("Removed {} completely empty rows", before - rows.len());

        // Step 2: remove duplicate rows, first occurrence kept
        let before = rows.len();
        let mut seen: HashSet<Vec<String>> = HashSet::new();
        let rows: Vec<Record> = rows
            .into_iter()
            .filter(|r| {
                let key: Vec<String> = headers
                    .iter()
                    .map(|h| r.get_or(h, "").to_string())
                    .collect();
                seen.insert(key)
            })
            .collect();
        tracing::info!("Removed {} duplicate rows", before - rows.len());

        // Step 3: trim whitespace from every field
        let rows: Vec<Record> = rows
            .into_iter()
            .map(|r| {
                Record::from_pairs(r.fields.iter().map(|(k, v)| (k.clone(), v.trim().to_string())))
            })
            .collect();
        tracing::info!("Trimmed whitespace from {} columns", headers.len());

        let kept = rows.len();
        tracing::info!("Final size: {} rows", kept);

        let contents = csvio::to_csv_bytes(&headers, &rows)?;
        let filename = format!("clean_data_{}.csv", timestamp_tag());

        Ok(TaskOutput {
            files: vec![OutputFile::new(filename, contents)],
            processed: input_count,
            succeeded: kept,
            failed: 0,
        })
    }

    async fn load(&self, output: TaskOutput) -> Result<TaskReport> {
        let mut outputs = Vec::new();
        for file in &output.files {
            self.storage.write_file(&file.name, &file.contents).await?;
            outputs.push(format!("{}/{}", self.config.output_dir, file.name));
        }

        Ok(TaskReport {
            processed: output.processed,
            succeeded: output.succeeded,
            failed: output.failed,
            outputs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn task_for(input: &NamedTempFile, out: &TempDir) -> CleanTask<LocalStorage> {
        let output_dir = out.path().to_str().unwrap().to_string();
        CleanTask::new(
            LocalStorage::new(output_dir.clone()),
            CleanConfig {
                input: input.path().to_str().unwrap().to_string(),
                output_dir,
            },
        )
    }

    #[tokio::test]
    async fn test_blank_and_duplicate_rows_are_dropped() {
        let mut input = NamedTempFile::new().unwrap();
        writeln!(input, "name,city").unwrap();
        writeln!(input, "Alice,Berlin").unwrap();
        writeln!(input, ",").unwrap();
        writeln!(input, "Alice,Berlin").unwrap();
        writeln!(input, "Bob,Lisbon").unwrap();

        let out = TempDir::new().unwrap();
        let task = task_for(&input, &out);

        let rows = task.extract().await.unwrap();
        assert_eq!(rows.len(), 4);

        let output = task.transform(rows).await.unwrap();
        assert_eq!(output.processed, 4);
        assert_eq!(output.succeeded, 2);

        let text = String::from_utf8(output.files[0].contents.clone()).unwrap();
        assert_eq!(text, "name,city\nAlice,Berlin\nBob,Lisbon\n");
    }

    #[tokio::test]
    async fn test_whitespace_is_trimmed_from_fields() {
        let mut input = NamedTempFile::new().unwrap();
        writeln!(input, "name,city").unwrap();
        writeln!(input, "  Alice  , Berlin ").unwrap();

        let out = TempDir::new().unwrap();
        let task = task_for(&input, &out);

        let rows = task.extract().await.unwrap();
        let output = task.transform(rows).await.unwrap();

        let text = String::from_utf8(output.files[0].contents.clone()).unwrap();
        assert_eq!(text, "name,city\nAlice,Berlin\n");
    }

    #[tokio::test]
    async fn test_whitespace_only_row_counts_as_blank() {
        let mut input = NamedTempFile::new().unwrap();
        writeln!(input, "name,city").unwrap();
        writeln!(input, "  , ").unwrap();
        writeln!(input, "Bob,Lisbon").unwrap();

        let out = TempDir::new().unwrap();
        let task = task_for(&input, &out);

        let rows = task.extract().await.unwrap();
        let output = task.transform(rows).await.unwrap();
        assert_eq!(output.succeeded, 1);
    }

    #[tokio::test]
    async fn test_header_survives_when_all_rows_dropped() {
        let mut input = NamedTempFile::new().unwrap();
        writeln!(input, "name,city").unwrap();
        writeln!(input, ",").unwrap();

        let out = TempDir::new().unwrap();
        let task = task_for(&input, &out);

        let rows = task.extract().await.unwrap();
        let output = task.transform(rows).await.unwrap();

        let text = String::from_utf8(output.files[0].contents.clone()).unwrap();
        assert_eq!(text, "name,city\n");
    }

    #[tokio::test]
    async fn test_missing_input_file_aborts() {
        let out = TempDir::new().unwrap();
        let output_dir = out.path().to_str().unwrap().to_string();
        let task = CleanTask::new(
            LocalStorage::new(output_dir.clone()),
            CleanConfig {
                input: "definitely_not_here.csv".to_string(),
                output_dir,
            },
        );

        assert!(task.extract().await.is_err());
    }
}
