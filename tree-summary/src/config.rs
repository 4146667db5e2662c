//! Run configuration for the tree summarizer.
//!
//! Everything the walk needs is collected into one [`SummarizerConfig`]
//! built at startup; the credential is resolved separately through
//! [`load_api_key`] so the walk itself never touches the environment.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_ROOT: &str = "./";
pub const DEFAULT_OUTPUT_FILE: &str = "PROJECT_STRUCTURE_SUMMARY.md";
pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_MODEL: &str = "gpt-5-nano";
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Folder names that are never listed or descended into, at any depth.
pub const EXCLUDED_FOLDERS: &[&str] = &[
    "node_modules",
    "android",
    "ios",
    ".expo",
    ".expo-shared",
    ".gradle",
    "dist",
    "build",
    "web-build",
    "coverage",
    "__tests__",
    "venv",
    "__pycache__",
    ".git",
    ".vscode",
    "logs",
];

pub const SOURCE_EXTENSIONS: &[&str] = &["py", "js", "jsx", "ts", "tsx"];

/// Extensions whose large files get markup stripped before summarizing.
pub const FRONTEND_EXTENSIONS: &[&str] = &["js", "jsx", "tsx"];

pub const FRONTEND_CLEAN_THRESHOLD: usize = 6000;
pub const MIN_CONTENT_CHARS: usize = 5;
pub const DEFAULT_SUMMARY_LANGUAGE: &str = "Vietnamese";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing OPENAI_API_KEY. Set it in {env_file} or in the environment.")]
    MissingApiKey { env_file: String },

    #[error("Failed to load env file {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
}

#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub root: PathBuf,
    pub output_file: PathBuf,
    pub model: String,
    pub excluded_folders: BTreeSet<String>,
    pub source_extensions: BTreeSet<String>,
    pub frontend_extensions: BTreeSet<String>,
    pub frontend_clean_threshold: usize,
    pub min_content_chars: usize,
    pub summary_language: String,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            model: DEFAULT_MODEL.to_string(),
            excluded_folders: to_set(EXCLUDED_FOLDERS),
            source_extensions: to_set(SOURCE_EXTENSIONS),
            frontend_extensions: to_set(FRONTEND_EXTENSIONS),
            frontend_clean_threshold: FRONTEND_CLEAN_THRESHOLD,
            min_content_chars: MIN_CONTENT_CHARS,
            summary_language: DEFAULT_SUMMARY_LANGUAGE.to_string(),
        }
    }
}

impl SummarizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_output_file(mut self, output_file: impl Into<PathBuf>) -> Self {
        self.output_file = output_file.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_summary_language(mut self, language: impl Into<String>) -> Self {
        self.summary_language = language.into();
        self
    }

    /// Exact name match; the full path is never consulted.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_folders.contains(name)
    }

    pub fn is_source_extension(&self, ext: &str) -> bool {
        self.source_extensions.contains(ext)
    }

    /// True when a file of this extension and character count must be
    /// run through the markup cleaner first.
    pub fn needs_cleaning(&self, ext: &str, char_count: usize) -> bool {
        self.frontend_extensions.contains(ext) && char_count > self.frontend_clean_threshold
    }
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Loads `env_file` into the process environment (existing variables win,
/// a missing file is fine) and returns the API key.
pub fn load_api_key(env_file: &Path) -> Result<String, ConfigError> {
    match dotenvy::from_path(env_file) {
        Ok(()) => debug!("Loaded environment from {}", env_file.display()),
        Err(e) if e.not_found() => debug!("No env file at {}", env_file.display()),
        Err(source) => {
            return Err(ConfigError::EnvFile {
                path: env_file.display().to_string(),
                source,
            })
        }
    }

    match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ConfigError::MissingApiKey {
            env_file: env_file.display().to_string(),
        }),
    }
}
