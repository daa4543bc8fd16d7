//! Persisted UI preferences and label lookup.
//!
//! Only the language choice is stored, under a single key, in a flat JSON
//! map on disk. Preferences are cosmetic: an unreadable file is logged and
//! treated as empty.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const LANGUAGE_KEY: &str = "nomo-language";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to write preferences: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode preferences: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "en" => Some(Language::En),
            "zh" => Some(Language::Zh),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// String key-value store backed by one JSON file.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl PreferenceStore {
    /// Load from `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring corrupt preferences");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read preferences");
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set a value and write the whole map back.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn save(&self) -> Result<(), PrefsError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }

    /// Stored language, English when unset or unrecognised.
    pub fn language(&self) -> Language {
        self.get(LANGUAGE_KEY)
            .and_then(Language::from_code)
            .unwrap_or_default()
    }

    pub fn set_language(&mut self, language: Language) -> Result<(), PrefsError> {
        self.set(LANGUAGE_KEY, language.code())
    }
}

// (key, en, zh)
const LABELS: &[(&str, &str, &str)] = &[
    ("markets.title", "Prediction Markets", "预测市场"),
    ("markets.sample", "Sample markets (wallet not connected)", "示例市场（钱包未连接）"),
    ("markets.empty", "No markets yet", "暂无市场"),
    ("markets.liquidity", "Liquidity", "流动性"),
    ("markets.ends", "Ends", "结束"),
    ("markets.resolved", "Resolved", "已结算"),
    ("markets.awaiting", "Ended, awaiting resolution", "已结束，等待结算"),
    ("predictions.yes", "YES", "是"),
    ("predictions.no", "NO", "否"),
    ("predictions.volume", "Volume", "交易量"),
    ("predictions.users", "Users", "用户"),
    ("wallet.connected", "Connected as", "已连接"),
];

/// Label for `key` in `language`; unknown keys come back unchanged.
pub fn t(language: Language, key: &str) -> &str {
    LABELS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, en, zh)| match language {
            Language::En => *en,
            Language::Zh => *zh,
        })
        .unwrap_or(key)
}
