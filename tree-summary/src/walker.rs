//! Depth-first walk that turns a directory into [`TreeLine`]s.
//!
//! Entries are visited in byte-wise name order. Excluded names are dropped
//! before anything else happens to them, so they neither render nor count
//! as a sibling when picking the corner glyph. Every per-file problem is
//! captured as a [`FileOutcome`] and rendered as a placeholder bullet; the
//! walk itself never fails.

use crate::cleaner::clean_markup;
use crate::config::SummarizerConfig;
use crate::prompt::summarize_file;
use crate::tree::{Connector, TreeLine};
use futures::future::{BoxFuture, FutureExt};
use model::ModelProvider;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const READ_FAILED_BULLET: &str = "Could not read file";

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Extension is not in the source set; the file was not opened.
    NotSource,
    /// Trimmed content below the minimum; no request was made.
    Empty,
    Summarized(String),
    ReadFailed(String),
    SummaryFailed(String),
}

impl FileOutcome {
    /// Bullet lines for this outcome, drawn under an entry at `prefix`.
    pub fn bullets(&self, prefix: &str) -> Vec<TreeLine> {
        match self {
            FileOutcome::NotSource | FileOutcome::Empty => Vec::new(),
            FileOutcome::Summarized(summary) => summary
                .lines()
                .map(|line| TreeLine::bullet(prefix, line))
                .collect(),
            FileOutcome::ReadFailed(_) => vec![TreeLine::bullet(prefix, READ_FAILED_BULLET)],
            FileOutcome::SummaryFailed(reason) => {
                vec![TreeLine::bullet(prefix, format!("Could not summarize: {}", reason))]
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub directories: usize,
    pub files: usize,
    pub summarized: usize,
    pub skipped_empty: usize,
    pub failures: usize,
}

pub struct TreeSummarizer<'a> {
    config: &'a SummarizerConfig,
    provider: &'a dyn ModelProvider,
    stats: WalkStats,
}

impl<'a> TreeSummarizer<'a> {
    pub fn new(config: &'a SummarizerConfig, provider: &'a dyn ModelProvider) -> Self {
        Self {
            config,
            provider,
            stats: WalkStats::default(),
        }
    }

    pub fn stats(&self) -> &WalkStats {
        &self.stats
    }

    /// Walks the configured root and returns every line of the tree.
    pub async fn run(&mut self) -> Vec<TreeLine> {
        let root = self.config.root.clone();
        self.walk(root, String::new()).await
    }

    /// Lines for the subtree under `dir`, each drawn after `prefix`.
    pub fn walk(&mut self, dir: PathBuf, prefix: String) -> BoxFuture<'_, Vec<TreeLine>> {
        async move {
            let mut lines = Vec::new();

            let entries = match self.list_entries(&dir) {
                Some(entries) => entries,
                None => return lines,
            };

            let total = entries.len();
            for (index, (name, path)) in entries.into_iter().enumerate() {
                let connector = Connector::for_position(index, total);

                if path.is_dir() {
                    self.stats.directories += 1;
                    lines.push(TreeLine::directory(&prefix, connector, &name));

                    let child_prefix = format!("{}{}", prefix, connector.child_indent());
                    let children = self.walk(path, child_prefix).await;
                    lines.extend(children);
                } else {
                    self.stats.files += 1;
                    lines.push(TreeLine::file(&prefix, connector, &name));

                    let outcome = self.summarize_entry(&path, &name).await;
                    self.record(&outcome);
                    lines.extend(outcome.bullets(&prefix));
                }
            }

            lines
        }
        .boxed()
    }

    /// Sorted, exclusion-filtered `(name, path)` pairs, or `None` if the
    /// directory cannot be listed.
    fn list_entries(&self, dir: &Path) -> Option<Vec<(String, PathBuf)>> {
        let read_dir = match fs::read_dir(dir) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                warn!("Cannot list {}: {}", dir.display(), e);
                return None;
            }
        };

        let mut entries: Vec<_> = read_dir
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    None
                }
            })
            .map(|entry| (entry.file_name(), entry.path()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        Some(
            entries
                .into_iter()
                .map(|(name, path)| (name.to_string_lossy().into_owned(), path))
                .filter(|(name, _)| {
                    let excluded = self.config.is_excluded(name);
                    if excluded {
                        debug!("Excluding {}", name);
                    }
                    !excluded
                })
                .collect(),
        )
    }

    async fn summarize_entry(&self, path: &Path, name: &str) -> FileOutcome {
        let ext = match Path::new(name).extension().and_then(|e| e.to_str()) {
            Some(ext) if self.config.is_source_extension(ext) => ext,
            _ => return FileOutcome::NotSource,
        };

        let content = match fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!("Error reading file {}: {}", path.display(), e);
                return FileOutcome::ReadFailed(e.to_string());
            }
        };

        if content.trim().chars().count() < self.config.min_content_chars {
            info!("Skipping empty file {}", path.display());
            return FileOutcome::Empty;
        }

        let char_count = content.chars().count();
        info!("Reading file {} ({} chars)", path.display(), char_count);

        let content = if self.config.needs_cleaning(ext, char_count) {
            info!("Cleaning large frontend file {}", name);
            clean_markup(&content)
        } else {
            content
        };

        match summarize_file(
            self.provider,
            &self.config.model,
            &self.config.summary_language,
            &content,
            name,
        )
        .await
        {
            Ok(summary) => FileOutcome::Summarized(summary),
            Err(e) => {
                warn!("Error summarizing {}: {}", name, e);
                FileOutcome::SummaryFailed(e.to_string())
            }
        }
    }

    fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Summarized(_) => self.stats.summarized += 1,
            FileOutcome::Empty => self.stats.skipped_empty += 1,
            FileOutcome::ReadFailed(_) | FileOutcome::SummaryFailed(_) => self.stats.failures += 1,
            FileOutcome::NotSource => {}
        }
    }
}
