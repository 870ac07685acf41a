use anyhow::Context;
use casebook_core::config::default_variant_from_env_value;
use casebook_core::constants::DEFAULT_MAX_SESSIONS;
use casebook_core::{ContentRegistry, CoreConfig};
use casebook_present::render_view;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "casebook")]
#[command(about = "Browse the Casebook case study from the terminal")]
struct Cli {
    /// Directory of extra YAML content variants (overrides CASEBOOK_CONTENT_DIR)
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sections of a variant in menu order
    Sections {
        /// Content variant id (optional)
        #[arg(long)]
        variant: Option<String>,
    },
    /// Print one section
    Show {
        /// Section name, e.g. "Key Takeaways"
        section: String,
        /// Content variant id (optional)
        #[arg(long)]
        variant: Option<String>,
        /// Output width in columns
        #[arg(long, default_value_t = 80)]
        width: usize,
        /// Print the rendered view as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the available content variants
    Variants,
    /// Load and validate all content, failing on the first error
    Validate,
}

/// Settings read from the environment once at start-up.
struct Env {
    default_variant: String,
    content_dir: Option<PathBuf>,
}

impl Env {
    fn from_process() -> Self {
        Self {
            default_variant: default_variant_from_env_value(std::env::var("CASEBOOK_VARIANT").ok()),
            content_dir: std::env::var("CASEBOOK_CONTENT_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

/// What a command prints: `stdout` for the result, `notice` for stderr.
#[derive(Debug, Default)]
struct Output {
    stdout: String,
    notice: Option<String>,
}

impl Output {
    fn text(stdout: String) -> Self {
        Self {
            stdout,
            notice: None,
        }
    }
}

fn load_registry(content_dir: Option<PathBuf>, env: Env) -> anyhow::Result<ContentRegistry> {
    let content_dir = content_dir.or(env.content_dir);
    let cfg = CoreConfig::new(env.default_variant, None, content_dir, DEFAULT_MAX_SESSIONS)?;
    let registry = ContentRegistry::from_config(&cfg).context("failed to load content")?;
    Ok(registry)
}

fn run(cli: Cli, env: Env) -> anyhow::Result<Output> {
    let Some(command) = cli.command else {
        return Ok(Output::text("Use 'casebook --help' for commands\n".into()));
    };
    let registry = load_registry(cli.content_dir, env)?;

    let output = match command {
        Commands::Sections { variant } => {
            let navigator = registry.get_or_default(variant.as_deref())?;
            let mut out = String::new();
            for (position, name) in navigator.section_names().into_iter().enumerate() {
                out.push_str(&format!("{}. {}\n", position + 1, name));
            }
            Output::text(out)
        }
        Commands::Show {
            section,
            variant,
            width,
            json,
        } => {
            let navigator = registry.get_or_default(variant.as_deref())?;
            let outcome = navigator.select_or_default(Some(&section));
            let view = navigator.render_selection(&outcome.selection);
            let notice = outcome.rejected.map(|rejected| {
                format!(
                    "unknown section {:?}; showing {:?} (sections: {})",
                    rejected,
                    view.section,
                    navigator.section_names().join(", ")
                )
            });
            let stdout = if json {
                let mut text = serde_json::to_string_pretty(&view)?;
                text.push('\n');
                text
            } else {
                render_view(&view, width)
            };
            Output { stdout, notice }
        }
        Commands::Variants => {
            let default = registry.default_navigator().variant_id();
            let mut out = String::new();
            for navigator in registry.navigators() {
                let marker = if navigator.variant_id() == default {
                    " (default)"
                } else {
                    ""
                };
                out.push_str(&format!(
                    "{}\t{}{}\n",
                    navigator.variant_id(),
                    navigator.title(),
                    marker
                ));
            }
            Output::text(out)
        }
        Commands::Validate => {
            let mut out = String::new();
            for navigator in registry.navigators() {
                let blocks: usize = navigator.sections().iter().map(|s| s.blocks().len()).sum();
                out.push_str(&format!(
                    "{}: {} sections, {} blocks\n",
                    navigator.variant_id(),
                    navigator.sections().len(),
                    blocks
                ));
            }
            out.push_str("content ok\n");
            Output::text(out)
        }
    };

    Ok(output)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("casebook=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let output = run(cli, Env::from_process())?;
    if let Some(notice) = &output.notice {
        eprintln!("{notice}");
    }
    print!("{}", output.stdout);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Env {
        Env {
            default_variant: "textbot-v1".into(),
            content_dir: None,
        }
    }

    fn run_args(args: &[&str]) -> anyhow::Result<Output> {
        let cli = Cli::try_parse_from(std::iter::once("casebook").chain(args.iter().copied()))
            .expect("valid arguments");
        run(cli, env())
    }

    const EXTRA_VARIANT: &str = r#"
id: extra
title: Extra Case Study
sections:
  - name: Overview
    blocks:
      - kind: paragraph
        text: Hello.
"#;

    #[test]
    fn test_sections_in_menu_order() {
        let output = run_args(&["sections"]).expect("sections");
        let lines: Vec<&str> = output.stdout.lines().collect();
        assert_eq!(lines.first(), Some(&"1. Overview"));
        assert_eq!(lines.last(), Some(&"6. Key Takeaways"));
    }

    #[test]
    fn test_show_renders_text() {
        let output = run_args(&["show", "Client Background", "--width", "60"]).expect("show");
        assert!(output.notice.is_none());
        assert!(output.stdout.contains("== Client Background =="));
        assert!(output.stdout.contains("Drive leads to schedule appointments"));
    }

    #[test]
    fn test_show_unknown_section_falls_back_with_notice() {
        let output = run_args(&["show", "Pricing"]).expect("show");
        let notice = output.notice.expect("notice");
        assert!(notice.contains("\"Pricing\""));
        assert!(output.stdout.contains("== Overview =="));
    }

    #[test]
    fn test_show_json() {
        let output =
            run_args(&["show", "Challenge", "--variant", "textbot-v2", "--json"]).expect("show");
        let value: serde_json::Value = serde_json::from_str(&output.stdout).expect("json");
        assert_eq!(value["variant"], "textbot-v2");
        assert_eq!(value["section"], "Challenge");
    }

    #[test]
    fn test_show_unknown_variant_is_an_error() {
        let err = run_args(&["show", "Overview", "--variant", "nope"]).expect_err("should fail");
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_variants_marks_default() {
        let output = run_args(&["variants"]).expect("variants");
        assert!(output
            .stdout
            .contains("textbot-v1\tAI-Powered Textbot Case Study (default)"));
        assert!(output.stdout.contains("textbot-v2\t"));
    }

    #[test]
    fn test_validate_includes_content_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("extra.yaml"), EXTRA_VARIANT).expect("write");
        let dir_arg = dir.path().to_str().expect("utf-8 path");

        let output = run_args(&["validate", "--content-dir", dir_arg]).expect("validate");
        assert!(output.stdout.contains("extra: 1 sections, 1 blocks"));
        assert!(output.stdout.ends_with("content ok\n"));
    }

    #[test]
    fn test_validate_fails_on_bad_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bad = EXTRA_VARIANT.replace(
            "kind: paragraph\n        text: Hello.",
            "kind: challenge_axis\n        label: X\n        complexity: 11",
        );
        std::fs::write(dir.path().join("bad.yaml"), bad).expect("write");
        let dir_arg = dir.path().to_str().expect("utf-8 path");

        let err = run_args(&["validate", "--content-dir", dir_arg]).expect_err("should fail");
        assert!(format!("{err:#}").contains("11"));
    }

    #[test]
    fn test_no_command_prints_hint() {
        let output = run_args(&[]).expect("hint");
        assert!(output.stdout.contains("--help"));
    }
}
