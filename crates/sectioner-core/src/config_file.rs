use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub sections: Option<SectionsConfig>,
    pub backend: Option<BackendConfig>,
}

/// `[sections]` table: classifier and accumulator knobs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionsConfig {
    pub default_title: Option<String>,
    pub max_title_chars: Option<usize>,
    pub max_title_words: Option<usize>,
    pub keep_empty_titled_sections: Option<bool>,
    pub min_text_chars: Option<usize>,
    pub extra_junk_keywords: Option<Vec<String>>,
    pub extra_enumerator_patterns: Option<Vec<String>>,
    pub abort_on_unreadable_page: Option<bool>,
}

/// `[backend]` table: page text extraction knobs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Fraction of page height from the top to drop as running header.
    pub header_exclusion: Option<f32>,
    /// Fraction of page height from the bottom to drop as footer.
    pub footer_exclusion: Option<f32>,
}

/// Platform config directory path: `<config_dir>/sectioner/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sectioner").join("config.toml"))
}

/// Load config by cascading CWD `.sectioner.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".sectioner.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_s = base.sections.unwrap_or_default();
    let over_s = overlay.sections.unwrap_or_default();
    let base_b = base.backend.unwrap_or_default();
    let over_b = overlay.backend.unwrap_or_default();

    ConfigFile {
        sections: Some(SectionsConfig {
            default_title: over_s.default_title.or(base_s.default_title),
            max_title_chars: over_s.max_title_chars.or(base_s.max_title_chars),
            max_title_words: over_s.max_title_words.or(base_s.max_title_words),
            keep_empty_titled_sections: over_s
                .keep_empty_titled_sections
                .or(base_s.keep_empty_titled_sections),
            min_text_chars: over_s.min_text_chars.or(base_s.min_text_chars),
            extra_junk_keywords: concat(base_s.extra_junk_keywords, over_s.extra_junk_keywords),
            extra_enumerator_patterns: concat(
                base_s.extra_enumerator_patterns,
                over_s.extra_enumerator_patterns,
            ),
            abort_on_unreadable_page: over_s
                .abort_on_unreadable_page
                .or(base_s.abort_on_unreadable_page),
        }),
        backend: Some(BackendConfig {
            header_exclusion: over_b.header_exclusion.or(base_b.header_exclusion),
            footer_exclusion: over_b.footer_exclusion.or(base_b.footer_exclusion),
        }),
    }
}

/// "Extra" lists add up across the cascade: base entries first.
fn concat(base: Option<Vec<String>>, overlay: Option<Vec<String>>) -> Option<Vec<String>> {
    match (base, overlay) {
        (None, None) => None,
        (Some(list), None) | (None, Some(list)) => Some(list),
        (Some(mut list), Some(more)) => {
            list.extend(more);
            Some(list)
        }
    }
}

/// Save the config to the platform config directory.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf, String> {
    let path = config_path().ok_or_else(|| "Could not determine config directory".to_string())?;
    save_to_path(config, &path)?;
    Ok(path)
}

/// Save the config to an explicit path, creating parent directories.
pub fn save_to_path(config: &ConfigFile, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    let content =
        toml::to_string_pretty(config).map_err(|e| format!("Failed to serialize config: {}", e))?;
    std::fs::write(path, content).map_err(|e| format!("Failed to write config: {}", e))?;
    Ok(())
}
