use crate::core::{csvio, timestamp_tag};
use crate::domain::model::{OutputFile, Record, TaskOutput, TaskReport};
use crate::domain::ports::{FormDriver, Storage, Task};
use crate::utils::error::{Result, TaskError};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::time::Duration;
use tokio::sync::Mutex;

/// Stand-in rows used when the input file is absent.
pub fn example_rows() -> Vec<Record> {
    vec![
        Record::from_pairs([
            ("name", "Alice Smith"),
            ("email", "alice@example.com"),
            ("message", "Hello from Alice"),
        ]),
        Record::from_pairs([
            ("name", "Bob Jones"),
            ("email", "bob@example.com"),
            ("message", "Hello from Bob"),
        ]),
    ]
}

#[derive(Debug, Clone)]
pub struct FormFillConfig {
    pub url: String,
    pub input: String,
    /// Record column -> CSS selector of the input to fill. Empty means
    /// navigate-only, the stock behavior until selectors are filled in
    /// for the target site.
    pub fields: IndexMap<String, String>,
    pub submit_selector: Option<String>,
    pub success_selector: Option<String>,
    /// Polite delay between consecutive submissions.
    pub delay_ms: u64,
    pub output_dir: String,
}

/// Form filler: one browser session reused serially across rows, one
/// navigation + fill + submit attempt per row, outcomes appended to a
/// run log. A failed row is logged and skipped.
pub struct FormFillTask<S: Storage, D: FormDriver> {
    storage: S,
    config: FormFillConfig,
    driver: Mutex<D>,
}

impl<S: Storage, D: FormDriver> FormFillTask<S, D> {
    pub fn new(storage: S, config: FormFillConfig, driver: D) -> Self {
        Self {
            storage,
            config,
            driver: Mutex::new(driver),
        }
    }

    async fn fill_row(&self, driver: &mut D, row: &Record) -> Result<()> {
        driver.goto(&self.config.url).await?;
        tracing::debug!("  Opened: {}", self.config.url);

        for (column, selector) in &self.config.fields {
            let value = row.get(column).ok_or_else(|| TaskError::ProcessingError {
                message: format!("Row has no '{}' column", column),
            })?;
            driver.fill(selector, value).await?;
        }

        if let Some(submit) = &self.config.submit_selector {
            driver.click(submit).await?;
        }

        if let Some(success) = &self.config.success_selector {
            driver.wait_for(success).await?;
        }

        Ok(())
    }
}

fn log_line(row_num: usize, name: &str, status: &str, message: &str) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S");
    format!("[{}] Row {}: {} — {} {}", timestamp, row_num, name, status, message)
        .trim_end()
        .to_string()
}

#[async_trait]
impl<S: Storage, D: FormDriver> Task for FormFillTask<S, D> {
    async fn extract(&self) -> Result<Vec<Record>> {
        match csvio::read_records_or_examples(&self.config.input, example_rows()) {
            Ok(rows) => Ok(rows),
            Err(e) => {
                // The run aborts here, so the session would otherwise
                // never reach the close in transform.
                let mut driver = self.driver.lock().await;
                if let Err(close_err) = driver.close().await {
                    tracing::warn!("Failed to close browser session: {}", close_err);
                }
                Err(e)
            }
        }
    }

    async fn transform(&self, rows: Vec<Record>) -> Result<TaskOutput> {
        let total = rows.len();
        tracing::info!("Processing {} rows...", total);

        let mut driver = self.driver.lock().await;
        let mut lines = Vec::new();
        let mut succeeded = 0;
        let mut failed = 0;

        for (i, row) in rows.iter().enumerate() {
            let number = i + 1;
            let name = row.get_or("name", "Unknown").to_string();
            tracing::info!("Row {}/{}: {}", number, total, name);

            match self.fill_row(&mut driver, row).await {
                Ok(()) => {
                    succeeded += 1;
                    tracing::info!("  Successfully filled form for: {}", name);
                    lines.push(log_line(number, &name, "Success", ""));
                }
                Err(e) => {
                    failed += 1;
                    tracing::error!("  Error: {}", e);
                    lines.push(log_line(number, &name, "Failed", &e.to_string()));
                }
            }

            if number < total && self.config.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;
            }
        }

        if let Err(e) = driver.close().await {
            tracing::warn!("Failed to close browser session: {}", e);
        }

        let transcript = if lines.is_empty() {
            String::new()
        } else {
            lines.join("\n") + "\n"
        };
        let filename = format!("form_filler_log_{}.txt", timestamp_tag());

        Ok(TaskOutput {
            files: vec![OutputFile::new(filename, transcript.into_bytes())],
            processed: total,
            succeeded,
            failed,
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
