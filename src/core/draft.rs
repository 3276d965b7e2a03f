use crate::core::{csvio, template};
use crate::domain::model::{OutputFile, Record, TaskOutput, TaskReport};
use crate::domain::ports::{Storage, Task};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Default follow-up template. Placeholders are `{field}` tokens matched
/// against the contact's columns; edit freely per use case.
pub const DEFAULT_TEMPLATE: &str = "\
Subject: Following up - {topic}

Dear {name},

I hope this message finds you well.

I wanted to follow up on our recent conversation about {topic}.
It was great connecting with you at {company}, and I wanted to
share a few thoughts since our last meeting.

{custom_message}

Please feel free to reach out if you have any questions or if
you would like to schedule a follow-up call.

Best regards,
[Your Name]
[Your Contact Info]
";

/// Stand-in contacts used when the contacts file is absent.
pub fn example_contacts() -> Vec<Record> {
    vec![
        Record::from_pairs([
            ("name", "Sarah Johnson"),
            ("company", "Acme Corp"),
            ("topic", "the Q1 partnership proposal"),
            (
                "custom_message",
                "I believe there are exciting synergies we can explore together.",
            ),
        ]),
        Record::from_pairs([
            ("name", "Mark Lee"),
            ("company", "TechStart"),
            ("topic", "our software integration discussion"),
            (
                "custom_message",
                "The demo we discussed could be ready by next week.",
            ),
        ]),
        Record::from_pairs([
            ("name", "Priya Patel"),
            ("company", "GlobalTrade"),
            ("topic", "the logistics optimization project"),
            (
                "custom_message",
                "I have prepared some data that might be useful for your team.",
            ),
        ]),
    ]
}

#[derive(Debug, Clone)]
pub struct DraftConfig {
    pub contacts: String,
    pub template: String,
    pub output_dir: String,
}

/// Email drafter: fills the template once per contact and writes one
/// `.txt` draft per contact.
pub struct DraftTask<S: Storage> {
    storage: S,
    config: DraftConfig,
}

impl<S: Storage> DraftTask<S> {
    pub fn new(storage: S, config: DraftConfig) -> Self {
        Self { storage, config }
    }
}

fn safe_filename(name: &str) -> String {
    name.replace(' ', "_").replace('/', "-")
}

#[async_trait]
impl<S: Storage> Task for DraftTask<S> {
    async fn extract(&self) -> Result<Vec<Record>> {
        csvio::read_records_or_examples(&self.config.contacts, example_contacts())
    }

    async fn transform(&self, rows: Vec<Record>) -> Result<TaskOutput> {
        tracing::info!("Drafting emails for {} contacts...", rows.len());

        let mut files = Vec::new();
        for (i, contact) in rows.iter().enumerate() {
            let number = i + 1;
            let name = contact
                .get("name")
                .map(str::to_string)
                .unwrap_or_else(|| format!("Contact_{}", number));

            let rendered = template::render(&self.config.template, contact);
            for field in &rendered.missing {
                tracing::warn!("  Warning: Missing field '{}' for {}", field, name);
            }

            let filename = format!("email_{:02}_{}.txt", number, safe_filename(&name));
            tracing::info!("  [{}] Drafted email for {}", number, name);
            files.push(OutputFile::new(filename, rendered.text.into_bytes()));
        }

        Ok(TaskOutput {
            processed: rows.len(),
            succeeded: files.len(),
            failed: 0,
            files,
        })
    }

    async fn load(&self, output: TaskOutput) -> Result<TaskReport> {
        let mut outputs = Vec::new();
        let mut write_failures = 0;

        // One draft failing to write should not stop the rest.
        for file in &output.files {
            match self.storage.write_file(&file.name, &file.contents).await {
                Ok(()) => outputs.push(format!("{}/{}", self.config.output_dir, file.name)),
                Err(e) => {
                    tracing::error!("  Failed to save {}: {}", file.name, e);
                    write_failures += 1;
                }
            }
        }

        tracing::info!(
            "All {} emails saved to: {}/",
            outputs.len(),
            self.config.output_dir
        );

        Ok(TaskReport {
            processed: output.processed,
            succeeded: output.succeeded.saturating_sub(write_failures),
            failed: output.failed + write_failures,
            outputs,
        })
    }
}
