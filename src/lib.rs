pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::storage::LocalStorage;
pub use adapters::webdriver::WebDriverSession;
pub use config::{Cli, Command};
pub use core::clean::{CleanConfig, CleanTask};
pub use core::draft::{DraftConfig, DraftTask};
pub use core::engine::TaskEngine;
pub use core::form_fill::{FormFillConfig, FormFillTask};
pub use core::scrape::{ScrapeConfig, ScrapeTask};
pub use domain::model::{Record, TaskOutput, TaskReport};
pub use utils::error::{Result, TaskError};
