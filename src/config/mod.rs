use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Hex color overrides, e.g. `accent = "#FFC107"`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_edge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Replacement dataset (JSON, same schema as the built-in one)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,

    /// Glyph used for animals with no mapping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_glyph: Option<String>,

    /// Show the instructions card under the projection
    #[serde(default = "default_true")]
    pub show_instructions: bool,

    /// Extra or replacement glyphs, keyed by animal display name
    #[serde(default)]
    pub glyphs: BTreeMap<String, String>,

    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            default_glyph: None,
            show_instructions: true,
            glyphs: BTreeMap::new(),
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("holozoo");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
            // keep the user's broken file for them to fix
            return Ok(AppConfig::default());
        }

        let config = AppConfig::default();
        if let Err(e) = config.save() {
            tracing::debug!("Could not write default config: {}", e);
        }
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize, dropping entries that would have no effect
    pub fn to_toml(&self) -> Result<String> {
        let mut clean_config = self.clone();

        clean_config
            .glyphs
            .retain(|name, glyph| !name.trim().is_empty() && !glyph.trim().is_empty());

        if clean_config.default_glyph.as_ref().map(|g| g.trim().is_empty()).unwrap_or(false) {
            clean_config.default_glyph = None;
        }

        Ok(toml::to_string_pretty(&clean_config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let mut glyphs = BTreeMap::new();
        glyphs.insert("Snow Leopard".to_string(), "🐆".to_string());

        let config = AppConfig {
            dataset: Some(PathBuf::from("/tmp/animals.json")),
            default_glyph: Some("❓".to_string()),
            show_instructions: false,
            glyphs,
            theme: ThemeConfig {
                accent: Some("#FFC107".to_string()),
                ..ThemeConfig::default()
            },
        };

        let serialized = config.to_toml().unwrap();
        let deserialized = AppConfig::parse(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.show_instructions);
    }

    #[test]
    fn test_blank_entries_dropped_on_save() {
        let mut config = AppConfig::default();
        config.glyphs.insert("Meerkat".to_string(), " ".to_string());
        config.glyphs.insert("".to_string(), "🐾".to_string());
        config.glyphs.insert("Red Panda".to_string(), "🐾".to_string());
        config.default_glyph = Some(String::new());

        let reloaded = AppConfig::parse(&config.to_toml().unwrap()).unwrap();
        assert_eq!(reloaded.glyphs.len(), 1);
        assert_eq!(reloaded.glyphs["Red Panda"], "🐾");
        assert!(reloaded.default_glyph.is_none());
    }

    #[test]
    fn test_partial_file() {
        let config = AppConfig::parse(
            r##"
            default_glyph = "🐾"

            [glyphs]
            "Snow Leopard" = "🐆"

            [theme]
            background = "#101010"
            "##,
        )
        .unwrap();
        assert_eq!(config.default_glyph.as_deref(), Some("🐾"));
        assert_eq!(config.glyphs["Snow Leopard"], "🐆");
        assert_eq!(config.theme.background.as_deref(), Some("#101010"));
        assert!(config.show_instructions);
        assert!(config.dataset.is_none());
    }
}
