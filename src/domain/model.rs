use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One unit of input data: a mapping from column name to string value.
/// Insertion order is kept so output columns follow the input header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub fields: IndexMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }
}

/// A file produced by a task, written to storage during the load phase.
#[derive(Debug, Clone)]
pub struct OutputFile {
    pub name: String,
    pub contents: Vec<u8>,
}

impl OutputFile {
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// Result of a task's transform phase: files to write plus per-unit counters.
#[derive(Debug, Clone, Default)]
pub struct TaskOutput {
    pub files: Vec<OutputFile>,
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Final run summary returned by the engine.
#[derive(Debug, Clone)]
pub struct TaskReport {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub outputs: Vec<String>,
}
