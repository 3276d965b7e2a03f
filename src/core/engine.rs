use crate::core::Task;
use crate::domain::model::TaskReport;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct TaskEngine<T: Task> {
    task: T,
    monitor: SystemMonitor,
}

impl<T: Task> TaskEngine<T> {
    pub fn new(task: T) -> Self {
        Self {
            task,
            monitor: SystemMonitor::default(),
        }
    }

    pub fn new_with_monitoring(task: T, monitor_enabled: bool) -> Self {
        Self {
            task,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<TaskReport> {
        println!("Reading input...");
        let rows = self.task.extract().await?;
        println!("Loaded {} records", rows.len());
        self.monitor.log_stats("Extract");

        println!("Processing...");
        let output = self.task.transform(rows).await?;
        println!(
            "Processed {} records ({} succeeded, {} failed)",
            output.processed, output.succeeded, output.failed
        );
        self.monitor.log_stats("Transform");

        println!("Writing output...");
        let report = self.task.load(output).await?;
        for path in &report.outputs {
            println!("Output saved to: {}", path);
        }
        self.monitor.log_final_stats();

        Ok(report)
    }
}
