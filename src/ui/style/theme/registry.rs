use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use super::builtins::BUILT_IN_DEFINITIONS;
use super::types::{Theme, ThemeDefinition};

struct ThemeRegistry {
    canonical: BTreeMap<String, &'static ThemeDefinition>,
    aliases: HashMap<String, String>,
}

impl ThemeRegistry {
    fn get(&self, name: &str) -> Option<Theme> {
        let normalized = normalize_name(name);
        if let Some(definition) = self.canonical.get(&normalized) {
            return Some(definition.theme);
        }
        let target = self.aliases.get(&normalized)?;
        self.canonical.get(target).map(|definition| definition.theme)
    }

    fn names(&self) -> Vec<&'static str> {
        self.canonical
            .values()
            .map(|definition| definition.name)
            .collect()
    }
}

fn registry() -> &'static ThemeRegistry {
    static REGISTRY: OnceLock<ThemeRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut canonical = BTreeMap::new();
        let mut aliases = HashMap::new();
        for definition in BUILT_IN_DEFINITIONS {
            let normalized = normalize_name(definition.name);
            for alias in definition.aliases {
                aliases.insert(normalize_name(alias), normalized.clone());
            }
            canonical.insert(normalized, definition);
        }
        ThemeRegistry { canonical, aliases }
    })
}

fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Look up a theme by canonical name or alias, case-insensitively.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
    registry().get(name)
}

/// Canonical names of every built-in theme, sorted.
#[must_use]
pub fn names() -> Vec<&'static str> {
    registry().names()
}
