//! Command-line and environment configuration.

use crate::domain::DEFAULT_SKILLS;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_JSON_FILENAME: &str = "application.json";
pub const DEFAULT_CSV_FILENAME: &str = "application.csv";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "jobform",
    about = "Fill in and submit a job application from the terminal",
    version
)]
pub struct Config {
    /// Directory where submitted applications are saved and exported
    #[arg(long, env = "JOBFORM_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,
    /// Directory for the log file
    #[arg(long, env = "JOBFORM_LOG_DIR", default_value = ".")]
    pub log_dir: PathBuf,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "JOBFORM_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
    /// Extra skill checkbox, may be repeated
    #[arg(long = "skill", env = "JOBFORM_SKILLS", value_delimiter = ',')]
    pub extra_skills: Vec<String>,
    /// JSON draft used to pre-fill the form
    #[arg(long)]
    pub draft: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            log_dir: PathBuf::from("."),
            log_level: "info".to_string(),
            extra_skills: Vec::new(),
            draft: None,
        }
    }
}

impl Config {
    /// Skill labels offered on the form: the defaults followed by configured
    /// extras, without blanks or duplicates.
    pub fn skills(&self) -> Vec<String> {
        let mut skills: Vec<String> = DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect();
        for extra in &self.extra_skills {
            let extra = extra.trim();
            if !extra.is_empty() && !skills.iter().any(|s| s == extra) {
                skills.push(extra.to_string());
            }
        }
        skills
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join(DEFAULT_JSON_FILENAME)
    }

    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(DEFAULT_CSV_FILENAME)
    }
}
