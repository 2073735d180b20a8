//! Command-line interface for validating job configurations and
//! inspecting the capability registries.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

use crate::config::load_config;
use crate::error::Result;
use crate::registry::{ProblemType, Registries};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}

fn accent(s: &str) -> ColoredString {
    s.truecolor(120, 170, 255)
}

fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}

fn fail(s: &str) -> ColoredString {
    s.truecolor(235, 110, 110)
}

fn kv(key: &str, val: &str) {
    println!("  {} {}", dim(key), val.white());
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "autoomics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Configuration validation for the omics AutoML pipeline")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a job configuration file and print the resolved result
    Validate {
        /// Job configuration file (JSON)
        config: PathBuf,
        /// Write the resolved configuration to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the capability registries the validator checks against
    Registries,
}

/// Validate a job file, print a summary, optionally write the resolved
/// configuration. The process exit code reflects the outcome.
pub fn cmd_validate(config: &Path, output: Option<&Path>) -> Result<()> {
    let resolved = match load_config(config) {
        Ok(resolved) => resolved,
        Err(err) => {
            println!("  {} {}", fail("✗"), err);
            return Err(err);
        }
    };

    println!("  {} {}", ok("✓"), format!("{} is valid", config.display()));

    section("Job");
    kv("name        ", &resolved.data.name);
    kv("data type   ", &resolved.data.data_type.to_string());
    kv("problem type", &resolved.ml.problem_type.to_string());
    kv("models      ", &resolved.ml.model_list.join(", "));
    kv(
        "fit scorer  ",
        resolved.ml.fit_scorer.as_deref().unwrap_or("-"),
    );
    kv(
        "feature sel ",
        if resolved.ml.feature_selection.is_some() {
            "enabled"
        } else {
            "disabled"
        },
    );
    kv(
        "prediction  ",
        if resolved
            .prediction
            .as_ref()
            .is_some_and(|p| p.file_path.is_some())
        {
            "enabled"
        } else {
            "disabled"
        },
    );

    if let Some(path) = output {
        std::fs::write(path, resolved.to_json_pretty()?).map_err(|source| {
            crate::error::ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        println!();
        println!("  {} resolved config written to {}", accent("›"), path.display());
    }

    Ok(())
}

/// Print every registry the resolver consults.
pub fn cmd_registries() {
    let registries = Registries::builtin();

    for problem_type in [ProblemType::Classification, ProblemType::Regression] {
        section(&format!("{problem_type} models"));
        for name in registries.models.selectable_for(problem_type) {
            println!("  {name}");
        }

        section(&format!("{problem_type} metrics"));
        for (name, direction) in registries.metrics.for_problem(problem_type) {
            let arrow = if *direction > 0 { "higher is better" } else { "lower is better" };
            println!("  {name} {}", dim(arrow));
        }
    }

    section("feature-selection methods");
    for name in registries.selection.methods() {
        println!("  {name}");
    }
}
