//! Animal name -> emoji glyph used as the hologram image

use std::collections::BTreeMap;

/// Shown for any animal without a mapping
pub const DEFAULT_GLYPH: &str = "🦁";

const BUILTIN_GLYPHS: [(&str, &str); 12] = [
    ("Bengal Tiger", "🐅"),
    ("Asian Elephant", "🐘"),
    ("Red Panda", "🐼"),
    ("Bottlenose Dolphin", "🐬"),
    ("Green Sea Turtle", "🐢"),
    ("Great White Shark", "🦈"),
    ("Dromedary Camel", "🐪"),
    ("Fennec Fox", "🦊"),
    ("Meerkat", "🦦"),
    ("Polar Bear", "🐻‍❄️"),
    ("Arctic Fox", "🦊"),
    ("Emperor Penguin", "🐧"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct EmojiTable {
    glyphs: BTreeMap<String, String>,
    default_glyph: String,
}

impl Default for EmojiTable {
    fn default() -> Self {
        Self {
            glyphs: BUILTIN_GLYPHS
                .iter()
                .map(|(n, g)| (n.to_string(), g.to_string()))
                .collect(),
            default_glyph: DEFAULT_GLYPH.to_string(),
        }
    }
}

impl EmojiTable {
    /// Built-in table with user overrides layered on top.
    /// Blank override values are ignored.
    pub fn with_overrides(overrides: &BTreeMap<String, String>, default_glyph: Option<&str>) -> Self {
        let mut table = Self::default();
        for (name, glyph) in overrides {
            let glyph = glyph.trim();
            if glyph.is_empty() {
                continue;
            }
            table.glyphs.insert(name.clone(), glyph.to_string());
        }
        if let Some(default_glyph) = default_glyph.map(str::trim).filter(|g| !g.is_empty()) {
            table.default_glyph = default_glyph.to_string();
        }
        table
    }

    /// Never fails: unmapped names get the default glyph
    pub fn glyph(&self, name: &str) -> &str {
        self.glyphs
            .get(name)
            .map(String::as_str)
            .unwrap_or(&self.default_glyph)
    }

    pub fn default_glyph(&self) -> &str {
        &self.default_glyph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::HabitatCollection;

    #[test]
    fn test_builtin_mappings() {
        let table = EmojiTable::default();
        for (name, glyph) in BUILTIN_GLYPHS {
            assert_eq!(table.glyph(name), glyph);
        }
    }

    #[test]
    fn test_meerkat_is_not_default() {
        let table = EmojiTable::default();
        assert_eq!(table.glyph("Meerkat"), "🦦");
        assert_ne!(table.glyph("Meerkat"), DEFAULT_GLYPH);
    }

    #[test]
    fn test_unmapped_names_fall_back() {
        let table = EmojiTable::default();
        assert_eq!(table.glyph("Snow Leopard"), DEFAULT_GLYPH);
        assert_eq!(table.glyph(""), DEFAULT_GLYPH);
        // exact match only
        assert_eq!(table.glyph("bengal tiger"), DEFAULT_GLYPH);
        assert_eq!(table.glyph("Bengal Tiger "), DEFAULT_GLYPH);
    }

    #[test]
    fn test_every_builtin_animal_has_a_glyph() {
        let data = HabitatCollection::builtin().unwrap();
        let table = EmojiTable::default();
        for (_, animals) in data.habitats() {
            for animal in animals {
                assert_ne!(table.glyph(&animal.name), DEFAULT_GLYPH, "{}", animal.name);
            }
        }
    }

    #[test]
    fn test_overrides() {
        let mut overrides = BTreeMap::new();
        overrides.insert("Meerkat".to_string(), "🐾".to_string());
        overrides.insert("Snow Leopard".to_string(), "🐆".to_string());
        overrides.insert("Polar Bear".to_string(), "   ".to_string());

        let table = EmojiTable::with_overrides(&overrides, Some("❓"));
        assert_eq!(table.glyph("Meerkat"), "🐾");
        assert_eq!(table.glyph("Snow Leopard"), "🐆");
        assert_eq!(table.glyph("Polar Bear"), "🐻‍❄️");
        assert_eq!(table.glyph("Bengal Tiger"), "🐅");
        assert_eq!(table.glyph("Unknown"), "❓");
        assert_eq!(table.default_glyph(), "❓");
    }

    #[test]
    fn test_blank_default_override_ignored() {
        let table = EmojiTable::with_overrides(&BTreeMap::new(), Some(""));
        assert_eq!(table.default_glyph(), DEFAULT_GLYPH);
    }
}
