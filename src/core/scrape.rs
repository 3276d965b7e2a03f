use crate::core::{csvio, timestamp_tag};
use crate::domain::model::{OutputFile, Record, TaskOutput, TaskReport};
use crate::domain::ports::{Storage, Task};
use crate::utils::error::{Result, TaskError};
use async_trait::async_trait;
use reqwest::header;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// One value to pull out of each item block: a CSS selector plus either
/// the element's inner text or a named attribute. `strip_prefix` covers
/// attribute patterns like `class="star-rating Three"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub selector: String,
    #[serde(default)]
    pub attr: Option<String>,
    #[serde(default)]
    pub strip_prefix: Option<String>,
}

/// Field set for books.toscrape.com, the stock example target. Edit the
/// job config for any other site.
pub fn default_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec {
            name: "title".to_string(),
            selector: "h3 a".to_string(),
            attr: Some("title".to_string()),
            strip_prefix: None,
        },
        FieldSpec {
            name: "price".to_string(),
            selector: ".price_color".to_string(),
            attr: None,
            strip_prefix: None,
        },
        FieldSpec {
            name: "rating".to_string(),
            selector: "p.star-rating".to_string(),
            attr: Some("class".to_string()),
            strip_prefix: Some("star-rating".to_string()),
        },
    ]
}

pub const DEFAULT_ITEM_SELECTOR: &str = "article.product_pod";

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub url: String,
    pub item_selector: String,
    pub fields: Vec<FieldSpec>,
    pub output_dir: String,
    pub timeout_secs: u64,
}

/// Web scraper: fetch one page, select item blocks, extract configured
/// fields, write the rows to a timestamped CSV.
pub struct ScrapeTask<S: Storage> {
    storage: S,
    config: ScrapeConfig,
}

impl<S: Storage> ScrapeTask<S> {
    pub fn new(storage: S, config: ScrapeConfig) -> Self {
        Self { storage, config }
    }

    fn parse_selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector).map_err(|e| TaskError::SelectorError {
            selector: selector.to_string(),
            message: e.to_string(),
        })
    }

    fn extract_field(item: &ElementRef, spec: &FieldSpec, selector: &Selector) -> String {
        let Some(element) = item.select(selector).next() else {
            return "N/A".to_string();
        };

        let raw = match &spec.attr {
            Some(attr) => match element.value().attr(attr) {
                Some(value) => value.to_string(),
                None => return "N/A".to_string(),
            },
            None => element.text().collect::<String>(),
        };

        let value = raw.trim();
        match &spec.strip_prefix {
            Some(prefix) => value
                .strip_prefix(prefix.as_str())
                .map(str::trim)
                .unwrap_or(value)
                .to_string(),
            None => value.to_string(),
        }
    }

    fn parse_items(&self, html: &str) -> Result<Vec<Record>> {
        let item_selector = Self::parse_selector(&self.config.item_selector)?;
        let mut field_selectors = Vec::new();
        for spec in &self.config.fields {
            field_selectors.push((spec, Self::parse_selector(&spec.selector)?));
        }

        let document = Html::parse_document(html);
        let items: Vec<ElementRef> = document.select(&item_selector).collect();
        tracing::info!("Found {} items on the page...", items.len());

        let mut records = Vec::new();
        for (i, item) in items.iter().enumerate() {
            let mut record = Record::new();
            for (spec, selector) in &field_selectors {
                record.insert(&spec.name, Self::extract_field(item, spec, selector));
            }

            let preview: Vec<&str> = field_selectors
                .iter()
                .take(2)
                .filter_map(|(spec, _)| record.get(&spec.name))
                .collect();
            tracing::info!("  [{}] {}", i + 1, preview.join(" - "));

            records.push(record);
        }

        Ok(records)
    }
}

#[async_trait]
impl<S: Storage> Task for ScrapeTask<S> {
    async fn extract(&self) -> Result<Vec<Record>> {
        tracing::info!("Fetching: {}", self.config.url);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()?;

        let response = client
            .get(&self.config.url)
            .header(header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .and_then(|r| r.error_for_status());

        // A fetch failure yields an empty result set, not a crash.
        let response = match response {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("Error fetching page: {}", e);
                return Ok(Vec::new());
            }
        };

        tracing::info!("Success! Status code: {}", response.status());

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                tracing::error!("Error reading page body: {}", e);
                return Ok(Vec::new());
            }
        };

        self.parse_items(&body)
    }

    async fn transform(&self, rows: Vec<Record>) -> Result<TaskOutput> {
        if rows.is_empty() {
            tracing::warn!("No items to save.");
            return Ok(TaskOutput::default());
        }

        let headers: Vec<String> = self
            .config
            .fields
            .iter()
            .map(|f| f.name.clone())
            .collect();
        let contents = csvio::to_csv_bytes(&headers, &rows)?;
        let filename = format!("scraped_data_{}.csv", timestamp_tag());

        let count = rows.len();
        Ok(TaskOutput {
            files: vec![OutputFile::new(filename, contents)],
            processed: count,
            succeeded: count,
            failed: 0,
        })
    }

    async fn load(&self, output: TaskOutput) -> Result<TaskReport> {
        let mut outputs = Vec::new();
        for file in &output.files {
            self.storage.write_file(&file.name, &file.contents).await?;
            tracing::info!("Saved {} items to: {}/{}", output.processed, self.config.output_dir, file.name);
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
