use crate::core::scrape::FieldSpec;
use crate::utils::error::{Result, TaskError};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML job file for the knobs flags cannot express: scrape
/// field specs, form field-to-selector mappings, the email template.
/// Meant to be edited per task, not a stable interface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobConfig {
    pub job: Option<JobMeta>,
    pub scrape: Option<ScrapeSection>,
    pub draft: Option<DraftSection>,
    pub fill: Option<FillSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMeta {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeSection {
    pub item_selector: Option<String>,
    pub fields: Option<Vec<FieldSpec>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftSection {
    pub template: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FillSection {
    /// Record column -> CSS selector of the input to fill.
    pub fields: Option<IndexMap<String, String>>,
    pub submit_selector: Option<String>,
    pub success_selector: Option<String>,
}

impl JobConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| TaskError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Load from an optional path; no path means all defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => {
                tracing::info!("Loading job config from: {}", p);
                Self::from_file(p)
            }
            None => Ok(Self::default()),
        }
    }

    /// Replace `${VAR}` references with environment values. Unresolved
    /// variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scrape_section() {
        let toml = r#"
            [job]
            name = "books"

            [scrape]
            item_selector = "article.product_pod"

            [[scrape.fields]]
            name = "title"
            selector = "h3 a"
            attr = "title"

            [[scrape.fields]]
            name = "price"
            selector = ".price_color"
        "#;

        let config = JobConfig::from_toml_str(toml).unwrap();
        let scrape = config.scrape.unwrap();

        assert_eq!(scrape.item_selector.as_deref(), Some("article.product_pod"));
        let fields = scrape.fields.unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].attr.as_deref(), Some("title"));
        assert!(fields[1].attr.is_none());
    }

    #[test]
    fn test_parse_fill_section_keeps_field_order() {
        let toml = r#"
            [fill]
            submit_selector = "button[type=submit]"

            [fill.fields]
            name = 'input[placeholder="Your Name"]'
            email = 'input[type="email"]'
            message = 'textarea[name="message"]'
        "#;

        let config = JobConfig::from_toml_str(toml).unwrap();
        let fill = config.fill.unwrap();
        let fields = fill.fields.unwrap();

        let columns: Vec<&String> = fields.keys().collect();
        assert_eq!(columns, vec!["name", "email", "message"]);
        assert_eq!(fill.success_selector, None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("AUTOKIT_TEST_SELECTOR", ".price");
        let toml = r#"
            [scrape]
            item_selector = "${AUTOKIT_TEST_SELECTOR}"
        "#;

        let config = JobConfig::from_toml_str(toml).unwrap();
        assert_eq!(
            config.scrape.unwrap().item_selector.as_deref(),
            Some(".price")
        );
    }

    #[test]
    fn test_unresolved_env_var_left_as_is() {
        let toml = r#"
            [draft]
            template = "Hello ${AUTOKIT_DOES_NOT_EXIST}"
        "#;

        let config = JobConfig::from_toml_str(toml).unwrap();
        assert_eq!(
            config.draft.unwrap().template.as_deref(),
            Some("Hello ${AUTOKIT_DOES_NOT_EXIST}")
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = JobConfig::from_toml_str("not [ valid toml");
        assert!(matches!(result, Err(TaskError::ConfigError { .. })));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = JobConfig::load_or_default(None).unwrap();
        assert!(config.scrape.is_none());
        assert!(config.fill.is_none());
    }
}
