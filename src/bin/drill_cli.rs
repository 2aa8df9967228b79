use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};

use drill_terminal::config::{self, ApiMode, AppConfig};
use drill_terminal::remote::{self, DrillApi};
use drill_terminal::report::{parse_analysis_json, report_headline, report_lines};
use drill_terminal::session::SessionStore;
use drill_terminal::upload::{Difficulty, DrillCategory, UploadState};

const USAGE: &str = "usage: drill_cli <video> --email <email> --password <password> \
[--title <title>] [--category <category>] [--difficulty <difficulty>] [--mock] \
| drill_cli --render <report.json>";

fn main() -> Result<()> {
    config::load_dotenv();
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    if let Some(path) = arg_value(&args, "--render") {
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read report {path}"))?;
        let report = parse_analysis_json(&raw)?.ok_or_else(|| anyhow!("report file is empty"))?;
        for line in report_lines(&report) {
            println!("{line}");
        }
        return Ok(());
    }

    let Some(video) = positional(&args) else {
        bail!("{USAGE}");
    };
    let email = arg_value(&args, "--email").unwrap_or_default();
    let password = arg_value(&args, "--password").unwrap_or_default();

    let mut app_config = AppConfig::from_env();
    if args.iter().any(|arg| arg == "--mock") {
        app_config.api_mode = ApiMode::Mock;
    }
    eprintln!(
        "[INFO] API mode {} ({})",
        config::api_mode_label(app_config.api_mode),
        app_config.api_base
    );
    let api: Arc<dyn DrillApi> = remote::build_api(&app_config);

    let mut session = SessionStore::new();
    if !session.login(api.as_ref(), &email, &password) {
        bail!("Login failed: check --email and --password");
    }
    if let Some(user) = session.user() {
        eprintln!("[INFO] Signed in as {} ({})", user.name, user.email);
    }

    let mut upload = UploadState::new();
    upload.select_file(video);
    upload.meta.title = arg_value(&args, "--title");
    upload.meta.category = choice_arg(&args, "--category", DrillCategory::parse)?;
    upload.meta.difficulty = choice_arg(&args, "--difficulty", Difficulty::parse)?;
    let submission = upload
        .prepare_submission()
        .map_err(|err| anyhow!("{err}"))?;

    eprintln!("[INFO] Uploading {}", submission.file_name);
    let report = api
        .analyze(&submission)
        .context("Upload failed: Network or server error.")?
        .ok_or_else(|| anyhow!("Upload failed: Analysis unsuccessful"))?;

    println!("{}", report_headline(&report));
    println!();
    for line in report_lines(&report) {
        println!("{line}");
    }
    Ok(())
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.clone());
            }
        }
    }
    None
}

/// An absent flag is fine. A value that names no known choice is a usage error.
fn choice_arg<T>(
    args: &[String],
    flag: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>> {
    let Some(raw) = arg_value(args, flag) else {
        return Ok(None);
    };
    match parse(&raw) {
        Some(choice) => Ok(Some(choice)),
        None => bail!("unknown {flag} value '{raw}'\n{USAGE}"),
    }
}

fn positional(args: &[String]) -> Option<&String> {
    const VALUE_FLAGS: [&str; 6] = [
        "--email",
        "--password",
        "--title",
        "--category",
        "--difficulty",
        "--render",
    ];
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
            continue;
        }
        if !arg.starts_with("--") {
            return Some(arg);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn known_choices_parse_in_either_flag_form() {
        let argv = args(&["drill.mp4", "--category", "dribbling", "--difficulty=Advanced"]);
        let category = choice_arg(&argv, "--category", DrillCategory::parse).unwrap();
        let difficulty = choice_arg(&argv, "--difficulty", Difficulty::parse).unwrap();
        assert_eq!(category, Some(DrillCategory::Dribbling));
        assert_eq!(difficulty, Some(Difficulty::Advanced));
    }

    #[test]
    fn missing_choice_is_none() {
        let argv = args(&["drill.mp4"]);
        assert_eq!(choice_arg(&argv, "--difficulty", Difficulty::parse).unwrap(), None);
    }

    #[test]
    fn unknown_choice_reports_usage() {
        let argv = args(&["drill.mp4", "--difficulty", "expert"]);
        let err = choice_arg(&argv, "--difficulty", Difficulty::parse).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("unknown --difficulty value 'expert'"));
        assert!(text.contains("usage: drill_cli"));

        let argv = args(&["drill.mp4", "--category=tackling"]);
        assert!(choice_arg(&argv, "--category", DrillCategory::parse).is_err());
    }

    #[test]
    fn positional_skips_flag_values() {
        let argv = args(&["--email", "a@b.c", "--title", "Sprint", "clip.mp4"]);
        assert_eq!(positional(&argv).map(String::as_str), Some("clip.mp4"));
    }
}
