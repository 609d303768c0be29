//! Content-source configuration.
//!
//! A TOML file names, per language, the corpus file and optionally the
//! word-list file to load at startup:
//!
//! ```toml
//! [languages.english]
//! corpus = "data/story_english.txt"
//!
//! [languages.tagalog]
//! corpus = "data/story_tagalog.txt"
//! words = "data/words_tagalog.txt"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Language;

/// Default config filename searched in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "readlab.toml";

/// Top-level readlab configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Content sources keyed by language.
    #[serde(default)]
    pub languages: BTreeMap<Language, LanguageSources>,
}

/// File sources for one language's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageSources {
    /// Corpus text file for sentence quizzes.
    pub corpus: PathBuf,
    /// Word-list file for word quizzes, one token per line.
    #[serde(default)]
    pub words: Option<PathBuf>,
}

impl ContentConfig {
    /// Rewrites relative source paths against `base` (the directory the
    /// config file was read from), leaving absolute paths untouched.
    fn resolve_paths(&mut self, base: &Path) {
        for sources in self.languages.values_mut() {
            if sources.corpus.is_relative() {
                sources.corpus = base.join(&sources.corpus);
            }
            if let Some(words) = &mut sources.words {
                if words.is_relative() {
                    *words = base.join(&*words);
                }
            }
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `readlab.toml` in the current directory
/// 2. `~/.config/readlab/config.toml`
pub fn load_config() -> Result<ContentConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
///
/// An explicit path must exist; when searching, a missing file yields an
/// empty config (no languages registered).
pub fn load_config_from(path: Option<&Path>) -> Result<ContentConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let mut config = toml::from_str::<ContentConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            config.resolve_paths(base);
            Ok(config)
        }
        None => Ok(ContentConfig::default()),
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("readlab"))
}
