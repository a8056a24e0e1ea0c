use crate::config::toml_config::PathwayConfig;
use crate::core::grades::Grade;
use crate::core::selection::Selection;
use crate::utils::error::{PathwayError, Result};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "edu-pathway")]
#[command(about = "Find university courses you qualify for from your KCSE subjects and grades")]
pub struct CliConfig {
    /// Base URL of the catalog API (overrides the config file)
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    /// Directory holding selected courses and the user record
    #[arg(long, global = true)]
    pub store_dir: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the subjects that can be picked
    Subjects,
    /// Compute total points and check the selection, e.g. `points mathematics:A english:B+`
    Points { subjects: Vec<String> },
    /// Submit a selection and list matching courses
    Find {
        subjects: Vec<String>,
        #[arg(long)]
        qualified_only: bool,
    },
    /// List courses for a navigation query such as `subjects=physics%3AA&points=40`
    Courses {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        qualified_only: bool,
    },
    /// Show one course
    Course { id: String },
    /// Add a course to the selected courses
    Select { id: String },
    /// Remove a course from the selected courses
    Unselect { id: String },
    /// Add the course if absent, remove it if present
    Toggle { id: String },
    /// Show the selected courses
    Selected {
        #[arg(long)]
        clear: bool,
    },
    /// Simulated M-Pesa payment that unlocks applications
    Pay {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        code: String,
    },
    /// Show payment status and selection count
    Status,
}

impl CliConfig {
    /// 載入設定檔後套用命令列覆蓋設定
    pub fn load_config(&self) -> Result<PathwayConfig> {
        let mut config = match &self.config {
            Some(path) => PathwayConfig::from_file(path)?,
            None => PathwayConfig::default(),
        };

        if let Some(url) = &self.api_base_url {
            config.api.base_url = Some(url.clone());
        }
        if let Some(dir) = &self.store_dir {
            config.storage.path = Some(dir.clone());
        }
        Ok(config)
    }
}

/// Builds a selection from `subject:grade` arguments, in argument order.
pub fn parse_selection(args: &[String]) -> Result<Selection> {
    let mut selection = Selection::new();

    for arg in args {
        let (subject, grade) = match arg.split_once(':') {
            Some((subject, label)) => {
                let grade = label
                    .parse::<Grade>()
                    .map_err(|e| PathwayError::InputError {
                        message: e.to_string(),
                    })?;
                (subject.trim(), Some(grade))
            }
            None => (arg.trim(), None),
        };

        if subject.is_empty() {
            return Err(PathwayError::InputError {
                message: format!("Missing subject in '{}'", arg),
            });
        }
        if selection.is_selected(subject) {
            return Err(PathwayError::InputError {
                message: format!("Subject '{}' given more than once", subject),
            });
        }
        if !selection.toggle_subject(subject) {
            tracing::warn!("⚠️ Selection is full, ignoring {}", subject);
            continue;
        }
        if let Some(grade) = grade {
            selection.set_grade(subject, grade);
        }
    }

    Ok(selection)
}
