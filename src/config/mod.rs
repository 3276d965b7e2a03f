pub mod job;

use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "autokit")]
#[command(about = "Example desk-automation tasks: CSV cleaning, email drafting, web scraping, form filling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log system resource usage per phase
    #[arg(long, global = true)]
    pub monitor: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clean a CSV file: drop blank and duplicate rows, trim whitespace
    Clean(CleanArgs),
    /// Draft templated emails from a contact list
    Draft(DraftArgs),
    /// Scrape a web page into a CSV file
    Scrape(ScrapeArgs),
    /// Fill and submit a web form once per CSV row
    FillForm(FillFormArgs),
}

#[derive(Debug, Args)]
pub struct CleanArgs {
    /// Input CSV file
    #[arg(long, default_value = "your_data.csv")]
    pub input: String,

    /// Directory for the cleaned file
    #[arg(long, default_value = "outputs")]
    pub output_dir: String,
}

#[derive(Debug, Args)]
pub struct DraftArgs {
    /// Contacts CSV file; falls back to example contacts when absent
    #[arg(long, default_value = "contacts.csv")]
    pub contacts: String,

    /// Template file overriding the built-in follow-up template
    #[arg(long)]
    pub template: Option<String>,

    /// Directory for the email drafts
    #[arg(long, default_value = "outputs/emails")]
    pub output_dir: String,

    /// Optional TOML job config (template text)
    #[arg(long)]
    pub config: Option<String>,
}

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Page to scrape
    #[arg(long, default_value = "https://books.toscrape.com")]
    pub url: String,

    /// Directory for the scraped CSV
    #[arg(long, default_value = "outputs")]
    pub output_dir: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout_secs: u64,

    /// Optional TOML job config (item selector and field specs)
    #[arg(long)]
    pub config: Option<String>,
}

#[derive(Debug, Args)]
pub struct FillFormArgs {
    /// Page with the form to fill
    #[arg(long)]
    pub url: String,

    /// CSV with one row per submission; falls back to example rows when absent
    #[arg(long, default_value = "form_data.csv")]
    pub input: String,

    /// WebDriver server address
    #[arg(long, default_value = "http://localhost:4444")]
    pub webdriver: String,

    /// Delay between consecutive submissions, in milliseconds
    #[arg(long, default_value = "2000")]
    pub delay_ms: u64,

    /// Run the browser without a visible window
    #[arg(long)]
    pub headless: bool,

    /// Directory for the run log
    #[arg(long, default_value = "outputs")]
    pub output_dir: String,

    /// Optional TOML job config (field mapping and submit selectors)
    #[arg(long)]
    pub config: Option<String>,
}

impl Validate for CleanArgs {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output_dir", &self.output_dir)?;
        Ok(())
    }
}

impl Validate for DraftArgs {
    fn validate(&self) -> Result<()> {
        validate_path("contacts", &self.contacts)?;
        validate_path("output_dir", &self.output_dir)?;
        if let Some(template) = &self.template {
            validate_path("template", template)?;
        }
        Ok(())
    }
}

impl Validate for ScrapeArgs {
    fn validate(&self) -> Result<()> {
        validate_url("url", &self.url)?;
        validate_path("output_dir", &self.output_dir)?;
        validate_range("timeout_secs", self.timeout_secs, 1, 300)?;
        Ok(())
    }
}

impl Validate for FillFormArgs {
    fn validate(&self) -> Result<()> {
        validate_url("url", &self.url)?;
        validate_url("webdriver", &self.webdriver)?;
        validate_path("input", &self.input)?;
        validate_path("output_dir", &self.output_dir)?;
        validate_range("delay_ms", self.delay_ms, 0, 60_000)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scrape_args_validation() {
        let args = ScrapeArgs {
            url: "https://books.toscrape.com".to_string(),
            output_dir: "outputs".to_string(),
            timeout_secs: 10,
            config: None,
        };
        assert!(args.validate().is_ok());

        let bad = ScrapeArgs {
            url: "ftp://nope".to_string(),
            ..args
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_fill_form_args_validation() {
        let args = FillFormArgs {
            url: "https://forms.example.com".to_string(),
            input: "form_data.csv".to_string(),
            webdriver: "http://localhost:4444".to_string(),
            delay_ms: 2000,
            headless: true,
            output_dir: "outputs".to_string(),
            config: None,
        };
        assert!(args.validate().is_ok());

        let bad = FillFormArgs {
            delay_ms: 120_000,
            ..args
        };
        assert!(bad.validate().is_err());
    }
}
