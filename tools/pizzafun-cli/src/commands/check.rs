//! Validate config and page content.

use std::fmt;

use pizzafun_common::config::AppConfig;
use pizzafun_page_model::content::{anchor_id, PageContent};
use pizzafun_render_engine::{render_document, PageFrame};

use super::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Ok,
    Warn,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CheckLine {
    status: Status,
    message: String,
}

impl CheckLine {
    fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl fmt::Display for CheckLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.status {
            Status::Ok => "OK",
            Status::Warn => "WARN",
            Status::Fail => "FAIL",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

fn check_config(loaded: anyhow::Result<AppConfig>) -> CheckLine {
    match loaded.and_then(|config| Ok(config.validate()?)) {
        Ok(()) => CheckLine::new(Status::Ok, "Config"),
        Err(e) => CheckLine::new(Status::Fail, format!("Config: {e}")),
    }
}

fn check_content(content: &PageContent) -> Vec<CheckLine> {
    let mut lines = Vec::new();

    let total = content.tokenomics.total_percent();
    if total == 100 {
        lines.push(CheckLine::new(
            Status::Ok,
            format!(
                "Tokenomics: {} allocations totalling 100%",
                content.tokenomics.allocations.len()
            ),
        ));
    } else {
        lines.push(CheckLine::new(
            Status::Fail,
            format!("Tokenomics: allocations total {total}%, expected 100%"),
        ));
    }

    for stat in &content.hero.stats {
        lines.push(match stat.target() {
            Ok(target) => CheckLine::new(
                Status::Ok,
                format!("Stat '{}': counts to {target}{}", stat.label, stat.suffix),
            ),
            Err(e) => CheckLine::new(Status::Fail, format!("Stat '{}': {e}", stat.label)),
        });
    }

    let document = render_document(content, &PageFrame::settled(content));
    for label in &content.header.nav {
        let id = anchor_id(label);
        lines.push(if document.find_by_id(&id).is_some() {
            CheckLine::new(Status::Ok, format!("Nav '{label}' -> #{id}"))
        } else {
            CheckLine::new(
                Status::Warn,
                format!("Nav '{label}' -> #{id} has no matching section"),
            )
        });
    }

    if let Err(e) = content.validate() {
        lines.push(CheckLine::new(Status::Fail, e.to_string()));
    }
    lines
}

fn failures(lines: &[CheckLine]) -> usize {
    lines.iter().filter(|l| l.status == Status::Fail).count()
}

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    println!("PizzaFun Content Check");
    println!("{}", "=".repeat(50));

    let mut lines = vec![check_config(ctx.config())];
    match ctx.content() {
        Ok(content) => lines.extend(check_content(&content)),
        Err(e) => lines.push(CheckLine::new(Status::Fail, format!("Content: {e}"))),
    }
    for line in &lines {
        println!("{line}");
    }

    let failures = failures(&lines);
    println!();
    if failures == 0 {
        println!("Content is valid.");
        Ok(())
    } else {
        anyhow::bail!("{failures} check(s) failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzafun_common::config::LoggingConfig;

    #[test]
    fn test_builtin_page_passes() {
        let content = PageContent::pizzafun();
        let mut lines = vec![check_config(Ok(AppConfig::default()))];
        lines.extend(check_content(&content));
        assert_eq!(failures(&lines), 0);
        assert_eq!(lines[0].to_string(), "[OK] Config");
    }

    #[test]
    fn test_broken_config_file_counts_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"viewport": {"fps": 0}}"#).unwrap();

        let ctx = Context::new(Some(path), None);
        let line = check_config(ctx.config());
        assert_eq!(line.status, Status::Fail);
        assert_eq!(failures(&[line]), 1);
    }

    #[test]
    fn test_missing_config_file_counts_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(Some(dir.path().join("absent.json")), None);
        assert_eq!(check_config(ctx.config()).status, Status::Fail);
        assert_eq!(ctx.logging(), LoggingConfig::default());
    }

    #[test]
    fn test_bad_tokenomics_fails() {
        let mut content = PageContent::pizzafun();
        content.tokenomics.allocations[0].value = u32::MAX;
        let lines = check_content(&content);
        assert!(failures(&lines) >= 1);
        assert!(lines[0].to_string().starts_with("[FAIL] Tokenomics"));
    }
}
