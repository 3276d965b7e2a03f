use crate::domain::model::{Record, TaskOutput, TaskReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// One automation task. Each subcommand is a standalone read → process →
/// write procedure expressed as the three phases the engine drives.
#[async_trait]
pub trait Task: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, rows: Vec<Record>) -> Result<TaskOutput>;
    async fn load(&self, output: TaskOutput) -> Result<TaskReport>;
}

/// Seam over the browser session so the form-fill loop can run against a
/// mock in tests. One driver instance is reused serially across rows.
#[async_trait]
pub trait FormDriver: Send + Sync {
    async fn goto(&mut self, url: &str) -> Result<()>;
    async fn fill(&mut self, selector: &str, value: &str) -> Result<()>;
    async fn click(&mut self, selector: &str) -> Result<()>;
    async fn wait_for(&mut self, selector: &str) -> Result<()>;
    async fn close(&mut self) -> Result<()>;
}
