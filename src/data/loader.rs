//! RON data loader
//!
//! Loads game content from external RON files, with fallback to hardcoded
//! defaults.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::bosses::{default_boss_templates, BossTemplates};
use super::monsters::{default_monster_templates, MonsterTemplates};
use crate::error::ConfigError;
use crate::items::LootTable;
use crate::progression::{default_skills, Skill};

/// Default location of the content files
pub const DEFAULT_DATA_DIR: &str = "assets/data";

const MONSTERS_FILE: &str = "monsters.ron";
const BOSSES_FILE: &str = "bosses.ron";
const SKILLS_FILE: &str = "skills.ron";
const LOOT_FILE: &str = "loot.ron";

/// Manages all external game data
#[derive(Debug, Clone, PartialEq)]
pub struct DataManager {
    /// Monster templates
    pub monsters: MonsterTemplates,
    /// District boss templates
    pub bosses: BossTemplates,
    /// Skill definitions
    pub skills: Vec<Skill>,
    /// Loot names by rarity
    pub loot: LootTable,
}

impl DataManager {
    /// Create a new DataManager, loading from assets/data or using defaults
    pub fn new() -> Self {
        Self::load_from(DEFAULT_DATA_DIR)
    }

    /// Load every content file under `base_path`. Missing or broken files
    /// fall back to the built-in set.
    pub fn load_from(base_path: impl AsRef<Path>) -> Self {
        let base_path = base_path.as_ref();
        Self {
            monsters: load_or(base_path, MONSTERS_FILE, default_monster_templates),
            bosses: load_or(base_path, BOSSES_FILE, default_boss_templates),
            skills: load_or(base_path, SKILLS_FILE, default_skills),
            loot: load_or(base_path, LOOT_FILE, LootTable::default),
        }
    }

    /// Find a skill definition by name
    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.name == name)
    }
}

impl Default for DataManager {
    fn default() -> Self {
        Self {
            monsters: default_monster_templates(),
            bosses: default_boss_templates(),
            skills: default_skills(),
            loot: LootTable::default(),
        }
    }
}

fn load_or<T: DeserializeOwned>(base_path: &Path, file: &str, fallback: fn() -> T) -> T {
    let path = base_path.join(file);
    if !path.exists() {
        log::debug!("{} not found, using built-in data", path.display());
        return fallback();
    }
    match fs::read_to_string(&path) {
        Ok(content) => match ron::from_str(&content) {
            Ok(data) => return data,
            Err(e) => log::warn!("Failed to parse {}: {}", file, e),
        },
        Err(e) => log::warn!("Failed to read {}: {}", file, e),
    }
    fallback()
}

fn write_ron<T: Serialize>(base_path: &Path, file: &str, data: &T) -> Result<(), ConfigError> {
    let text = ron::ser::to_string_pretty(data, ron::ser::PrettyConfig::default())?;
    fs::write(base_path.join(file), text)?;
    Ok(())
}

/// Export all default data to RON files for easy editing
pub fn export_default_data(base_path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let base_path = base_path.as_ref();
    fs::create_dir_all(base_path)?;

    let defaults = DataManager::default();
    write_ron(base_path, MONSTERS_FILE, &defaults.monsters)?;
    write_ron(base_path, BOSSES_FILE, &defaults.bosses)?;
    write_ron(base_path, SKILLS_FILE, &defaults.skills)?;
    write_ron(base_path, LOOT_FILE, &defaults.loot)?;

    log::info!("Exported default data to {}", base_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("chronicles-data-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_export_then_load() {
        let dir = scratch_dir("export");
        let result = export_default_data(&dir);
        assert!(result.is_ok(), "Failed to export default data: {:?}", result.err());

        for file in [MONSTERS_FILE, BOSSES_FILE, SKILLS_FILE, LOOT_FILE] {
            assert!(dir.join(file).exists(), "{} not created", file);
        }

        let manager = DataManager::load_from(&dir);
        assert_eq!(manager, DataManager::default());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_broken_file_falls_back() {
        let dir = scratch_dir("broken");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(BOSSES_FILE), "(templates: [oops").unwrap();

        let manager = DataManager::load_from(&dir);
        assert_eq!(manager.bosses, default_boss_templates());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_directory_uses_defaults() {
        let manager = DataManager::load_from(scratch_dir("missing"));
        assert!(!manager.monsters.templates.is_empty());
        assert!(manager.skill("Cleave").is_some());
    }
}
