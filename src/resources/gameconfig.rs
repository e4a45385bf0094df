//! Game configuration resource.
//!
//! Manages simulation settings loaded from an INI configuration file.
//! Provides defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [engine]
//! tps = 144
//! ticks = 600
//!
//! [combat]
//! hit_stun = 15
//! combo_max_attacks = 3
//! combo_window = 15
//! enemies = 2
//!
//! [snapshot]
//! capacity = 60
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_TPS: u32 = 144;
const DEFAULT_TICKS: u64 = 600;
const DEFAULT_HIT_STUN: i32 = 15;
const DEFAULT_COMBO_MAX_ATTACKS: u32 = 3;
const DEFAULT_COMBO_WINDOW: i32 = 15;
const DEFAULT_ENEMIES: u32 = 2;
const DEFAULT_SNAPSHOT_CAPACITY: usize = 60;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Stores the tick rate, run length, combat tuning and snapshot depth.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Simulation ticks per second.
    pub tps: u32,
    /// Ticks the headless runner simulates before exiting.
    pub ticks: u64,
    /// Stun applied by every hit, in ticks.
    pub hit_stun: i32,
    /// Attacks in a full combo.
    pub combo_max_attacks: u32,
    /// Ticks a combo waits for the next swing.
    pub combo_window: i32,
    /// Enemies spawned in the arena.
    pub enemies: u32,
    /// Ticks of history kept for rewind.
    pub snapshot_capacity: usize,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            tps: DEFAULT_TPS,
            ticks: DEFAULT_TICKS,
            hit_stun: DEFAULT_HIT_STUN,
            combo_max_attacks: DEFAULT_COMBO_MAX_ATTACKS,
            combo_window: DEFAULT_COMBO_WINDOW,
            enemies: DEFAULT_ENEMIES,
            snapshot_capacity: DEFAULT_SNAPSHOT_CAPACITY,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: tps={}, ticks={}, hit_stun={}, combo={}x{}, enemies={}, snapshots={}",
            self.tps,
            self.ticks,
            self.hit_stun,
            self.combo_max_attacks,
            self.combo_window,
            self.enemies,
            self.snapshot_capacity
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [engine] section
        if let Some(tps) = config.getuint("engine", "tps").ok().flatten() {
            self.tps = (tps as u32).max(1);
        }
        if let Some(ticks) = config.getuint("engine", "ticks").ok().flatten() {
            self.ticks = ticks;
        }

        // [combat] section
        if let Some(stun) = config.getint("combat", "hit_stun").ok().flatten() {
            self.hit_stun = stun as i32;
        }
        if let Some(attacks) = config.getuint("combat", "combo_max_attacks").ok().flatten() {
            self.combo_max_attacks = attacks as u32;
        }
        if let Some(window) = config.getint("combat", "combo_window").ok().flatten() {
            self.combo_window = window as i32;
        }
        if let Some(enemies) = config.getuint("combat", "enemies").ok().flatten() {
            self.enemies = enemies as u32;
        }

        // [snapshot] section
        if let Some(capacity) = config.getuint("snapshot", "capacity").ok().flatten() {
            self.snapshot_capacity = capacity as usize;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [engine] section
        config.set("engine", "tps", Some(self.tps.to_string()));
        config.set("engine", "ticks", Some(self.ticks.to_string()));

        // [combat] section
        config.set("combat", "hit_stun", Some(self.hit_stun.to_string()));
        config.set(
            "combat",
            "combo_max_attacks",
            Some(self.combo_max_attacks.to_string()),
        );
        config.set("combat", "combo_window", Some(self.combo_window.to_string()));
        config.set("combat", "enemies", Some(self.enemies.to_string()));

        // [snapshot] section
        config.set(
            "snapshot",
            "capacity",
            Some(self.snapshot_capacity.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Seconds per tick at the configured rate.
    pub fn tick_seconds(&self) -> f64 {
        1.0 / self.tps as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.tps, 144);
        assert_eq!(config.hit_stun, 15);
        assert_eq!(config.combo_window, 15);
        assert_eq!(config.snapshot_capacity, 60);
    }

    #[test]
    fn test_partial_ini_keeps_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[combat]\nhit_stun = 20\nenemies = 4\n")
            .unwrap();
        assert_eq!(config.hit_stun, 20);
        assert_eq!(config.enemies, 4);
        assert_eq!(config.tps, 144);
        assert_eq!(config.combo_max_attacks, 3);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("/nonexistent/chainengine.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config, GameConfig::with_path("/nonexistent/chainengine.ini"));
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let path = std::env::temp_dir().join(format!("chainengine-{}.ini", std::process::id()));
        let mut saved = GameConfig::with_path(&path);
        let text = "[engine]\ntps = 60\n[combat]\ncombo_window = 9\n[snapshot]\ncapacity = 4\n";
        saved.load_from_str(text).unwrap();
        saved.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        let result = loaded.load_from_file();
        std::fs::remove_file(&path).ok();
        result.unwrap();

        assert_eq!(loaded, saved);
        assert_eq!(loaded.tps, 60);
        assert_eq!(loaded.combo_window, 9);
        assert_eq!(loaded.snapshot_capacity, 4);
    }

    #[test]
    fn test_zero_tps_is_clamped() {
        let mut config = GameConfig::new();
        config.load_from_str("[engine]\ntps = 0\n").unwrap();
        assert_eq!(config.tps, 1);
    }
}
