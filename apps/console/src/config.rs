use std::{fs, time::Duration};

use serde::Deserialize;
use tracing::warn;

use shared::domain::{HeroId, HeroRecord};
use store::LatencyProfile;

#[derive(Debug, Clone, Deserialize)]
pub struct SeedHero {
    pub name: String,
    pub power: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub list_latency_ms: u64,
    pub mutate_latency_ms: u64,
    pub heroes: Vec<SeedHero>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            list_latency_ms: 800,
            mutate_latency_ms: 500,
            heroes: vec![
                SeedHero {
                    name: "Capitão Cometa".into(),
                    power: "Voar à velocidade da luz".into(),
                },
                SeedHero {
                    name: "Doutora Dimensão".into(),
                    power: "Manipulação de portais interdimensionais".into(),
                },
                SeedHero {
                    name: "Gigante Gentil".into(),
                    power: "Super-força e invulnerabilidade".into(),
                },
            ],
        }
    }
}

impl Settings {
    pub fn latency(&self) -> LatencyProfile {
        LatencyProfile {
            list: Duration::from_millis(self.list_latency_ms),
            mutate: Duration::from_millis(self.mutate_latency_ms),
        }
    }

    /// Seed heroes with ids assigned in file order, starting at 1.
    pub fn seed_records(&self) -> Vec<HeroRecord> {
        self.heroes
            .iter()
            .enumerate()
            .map(|(index, hero)| HeroRecord {
                id: HeroId(index as i64 + 1),
                name: hero.name.clone(),
                power: hero.power.clone(),
            })
            .collect()
    }
}

pub fn load_settings(path: &str) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<Settings>(&raw) {
            Ok(file_cfg) => settings = file_cfg,
            Err(err) => warn!("ignoring malformed settings file '{path}': {err}"),
        }
    }

    if let Ok(v) = std::env::var("ROSTER_LIST_LATENCY_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.list_latency_ms = parsed;
        }
    }
    if let Ok(v) = std::env::var("ROSTER_MUTATE_LATENCY_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.mutate_latency_ms = parsed;
        }
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_simulated_backend_profile() {
        let settings = Settings::default();
        assert_eq!(settings.list_latency_ms, 800);
        assert_eq!(settings.mutate_latency_ms, 500);
        assert_eq!(settings.heroes.len(), 3);
    }

    #[test]
    fn seed_records_get_sequential_ids_from_one() {
        let records = Settings::default().seed_records();
        assert_eq!(records[0].id, HeroId(1));
        assert_eq!(records[2].id, HeroId(3));
        assert_eq!(records[0].name, "Capitão Cometa");
    }

    #[test]
    fn partial_settings_file_keeps_container_defaults() {
        let settings: Settings =
            toml::from_str("list_latency_ms = 5").expect("parse");
        assert_eq!(settings.list_latency_ms, 5);
        assert_eq!(settings.mutate_latency_ms, 500);
        assert_eq!(settings.heroes.len(), 3);
    }

    #[test]
    fn hero_entries_override_the_default_seed() {
        let settings: Settings = toml::from_str(
            r#"
            [[heroes]]
            name = "Trovão Sónico"
            power = "Manipulação do som"
            "#,
        )
        .expect("parse");
        assert_eq!(settings.heroes.len(), 1);
        assert_eq!(settings.seed_records()[0].id, HeroId(1));
    }

    #[test]
    fn env_override_applies_after_the_file() {
        std::env::set_var("ROSTER_LIST_LATENCY_MS", "0");
        let settings = load_settings("does-not-exist.toml");
        assert_eq!(settings.list_latency_ms, 0);
        std::env::remove_var("ROSTER_LIST_LATENCY_MS");
    }
}
