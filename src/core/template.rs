use crate::domain::model::Record;
use regex::Regex;

/// Result of filling a template: when `missing` is non-empty the text is
/// the template unchanged, so a draft still gets written, just unfilled.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub text: String,
    pub missing: Vec<String>,
}

impl Rendered {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Fill `{field}` placeholders from one record.
pub fn render(template: &str, record: &Record) -> Rendered {
    let re = Regex::new(r"\{(\w+)\}").unwrap();

    let mut missing: Vec<String> = Vec::new();
    for caps in re.captures_iter(template) {
        let name = &caps[1];
        if record.get(name).is_none() && !missing.iter().any(|m| m == name) {
            missing.push(name.to_string());
        }
    }

    if !missing.is_empty() {
        return Rendered {
            text: template.to_string(),
            missing,
        };
    }

    let text = re
        .replace_all(template, |caps: &regex::Captures| {
            record.get(&caps[1]).unwrap_or("").to_string()
        })
        .to_string();

    Rendered {
        text,
        missing: Vec::new(),
    }
}
