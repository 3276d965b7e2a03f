use autokit::config::job::JobConfig;
use autokit::config::{Cli, CleanArgs, Command, DraftArgs, FillFormArgs, ScrapeArgs};
use autokit::core::{draft, scrape};
use autokit::utils::error::ErrorSeverity;
use autokit::utils::{logger, validation::Validate};
use autokit::{
    CleanConfig, CleanTask, DraftConfig, DraftTask, FormFillConfig, FormFillTask, LocalStorage,
    Result, ScrapeConfig, ScrapeTask, TaskEngine, TaskReport, WebDriverSession,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting autokit");

    let monitor = cli.monitor;
    if monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    match run(cli.command, monitor).await {
        Ok(report) => {
            tracing::info!(
                "✅ Task completed: {} processed, {} succeeded, {} failed",
                report.processed,
                report.succeeded,
                report.failed
            );
            println!(
                "✅ Done! {} processed, {} succeeded, {} failed",
                report.processed, report.succeeded, report.failed
            );
        }
        Err(e) => {
            tracing::error!("❌ Task failed: {} (Severity: {:?})", e, e.severity());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

async fn run(command: Command, monitor: bool) -> Result<TaskReport> {
    match command {
        Command::Clean(args) => run_clean(args, monitor).await,
        Command::Draft(args) => run_draft(args, monitor).await,
        Command::Scrape(args) => run_scrape(args, monitor).await,
        Command::FillForm(args) => run_fill_form(args, monitor).await,
    }
}

async fn run_clean(args: CleanArgs, monitor: bool) -> Result<TaskReport> {
    args.validate()?;

    let storage = LocalStorage::new(args.output_dir.clone());
    let task = CleanTask::new(
        storage,
        CleanConfig {
            input: args.input,
            output_dir: args.output_dir,
        },
    );

    TaskEngine::new_with_monitoring(task, monitor).run().await
}

async fn run_draft(args: DraftArgs, monitor: bool) -> Result<TaskReport> {
    args.validate()?;
    let job = JobConfig::load_or_default(args.config.as_deref())?;

    // Template resolution: --template file, then job config, then built-in.
    let template = match &args.template {
        Some(path) => std::fs::read_to_string(path)?,
        None => job
            .draft
            .and_then(|d| d.template)
            .unwrap_or_else(|| draft::DEFAULT_TEMPLATE.to_string()),
    };

    let storage = LocalStorage::new(args.output_dir.clone());
    let task = DraftTask::new(
        storage,
        DraftConfig {
            contacts: args.contacts,
            template,
            output_dir: args.output_dir,
        },
    );

    TaskEngine::new_with_monitoring(task, monitor).run().await
}

async fn run_scrape(args: ScrapeArgs, monitor: bool) -> Result<TaskReport> {
    args.validate()?;
    let job = JobConfig::load_or_default(args.config.as_deref())?;
    let section = job.scrape.unwrap_or_default();

    let storage = LocalStorage::new(args.output_dir.clone());
    let task = ScrapeTask::new(
        storage,
        ScrapeConfig {
            url: args.url,
            item_selector: section
                .item_selector
                .unwrap_or_else(|| scrape::DEFAULT_ITEM_SELECTOR.to_string()),
            fields: section.fields.unwrap_or_else(scrape::default_fields),
            output_dir: args.output_dir,
            timeout_secs: args.timeout_secs,
        },
    );

    TaskEngine::new_with_monitoring(task, monitor).run().await
}

async fn run_fill_form(args: FillFormArgs, monitor: bool) -> Result<TaskReport> {
    args.validate()?;
    let job = JobConfig::load_or_default(args.config.as_deref())?;
    let section = job.fill.unwrap_or_default();

    let driver = WebDriverSession::connect(&args.webdriver, args.headless).await?;

    let storage = LocalStorage::new(args.output_dir.clone());
    let task = FormFillTask::new(
        storage,
        FormFillConfig {
            url: args.url,
            input: args.input,
            fields: section.fields.unwrap_or_default(),
            submit_selector: section.submit_selector,
            success_selector: section.success_selector,
            delay_ms: args.delay_ms,
            output_dir: args.output_dir,
        },
        driver,
    );

    TaskEngine::new_with_monitoring(task, monitor).run().await
}
