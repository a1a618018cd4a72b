/// Encounter tuning — timings, countdown range, and message templates.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::core::template::{Field, MessageTemplate, TemplateError};
use crate::schema::enemy::EnemyDefinition;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid countdown range: min {min_ms}ms > max {max_ms}ms")]
    InvalidCountdownRange { min_ms: u64, max_ms: u64 },
    #[error("taunt interval must be greater than zero")]
    ZeroTauntInterval,
    #[error("resolution message must reference {{weakness}}")]
    ResolutionMissingWeakness,
    #[error("message template '{name}': {source}")]
    Template {
        name: &'static str,
        #[source]
        source: TemplateError,
    },
}

/// Inclusive range the encounter countdown is drawn from, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for CountdownRange {
    fn default() -> Self {
        Self {
            min_ms: 4500,
            max_ms: 7500,
        }
    }
}

impl CountdownRange {
    pub fn new(min_ms: u64, max_ms: u64) -> Result<Self, ConfigError> {
        let range = Self { min_ms, max_ms };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_ms > self.max_ms {
            return Err(ConfigError::InvalidCountdownRange {
                min_ms: self.min_ms,
                max_ms: self.max_ms,
            });
        }
        Ok(())
    }

    pub fn contains(&self, value: Duration) -> bool {
        let ms = value.as_millis();
        ms >= self.min_ms as u128 && ms <= self.max_ms as u128
    }
}

/// Raw message templates as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    pub intro: String,
    pub taunt: String,
    pub resolution: String,
    pub info: String,
    pub action_prompt: String,
    pub victory_prompt: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            intro: "{name} が現れた！\n{quote}".to_string(),
            taunt: "{name}「{line}」".to_string(),
            resolution: "あなたのこうげき！\n{name} は {weakness} に弱かった！".to_string(),
            info: "外見: {appearance}\n特徴: {trait}\n弱点: {weakness}".to_string(),
            action_prompt: "スペースキー：こうげき".to_string(),
            victory_prompt: "バトル勝利！".to_string(),
        }
    }
}

/// Parsed, ready-to-render message templates.
#[derive(Debug, Clone, PartialEq)]
pub struct Messages {
    pub intro: MessageTemplate,
    pub taunt: MessageTemplate,
    pub resolution: MessageTemplate,
    pub info: MessageTemplate,
    pub action_prompt: MessageTemplate,
    pub victory_prompt: MessageTemplate,
}

impl Messages {
    pub fn compile(config: &MessageConfig) -> Result<Messages, ConfigError> {
        Ok(Messages {
            intro: compile_one("intro", &config.intro)?,
            taunt: compile_one("taunt", &config.taunt)?,
            resolution: compile_one("resolution", &config.resolution)?,
            info: compile_one("info", &config.info)?,
            action_prompt: compile_one("action_prompt", &config.action_prompt)?,
            victory_prompt: compile_one("victory_prompt", &config.victory_prompt)?,
        })
    }

    pub fn intro(&self, enemy: &EnemyDefinition) -> String {
        self.intro.render(enemy, None)
    }

    pub fn taunt(&self, enemy: &EnemyDefinition, line: &str) -> String {
        self.taunt.render(enemy, Some(line))
    }

    pub fn resolution(&self, enemy: &EnemyDefinition) -> String {
        self.resolution.render(enemy, None)
    }

    pub fn info(&self, enemy: &EnemyDefinition) -> String {
        self.info.render(enemy, None)
    }

    pub fn action_prompt(&self, enemy: &EnemyDefinition) -> String {
        self.action_prompt.render(enemy, None)
    }

    pub fn victory_prompt(&self, enemy: &EnemyDefinition) -> String {
        self.victory_prompt.render(enemy, None)
    }

    /// Whether the resolution text names the weakness.
    pub fn resolution_mentions_weakness(&self) -> bool {
        self.resolution.uses(Field::Weakness)
    }
}

fn compile_one(name: &'static str, text: &str) -> Result<MessageTemplate, ConfigError> {
    MessageTemplate::parse(text).map_err(|source| ConfigError::Template { name, source })
}

/// All tunable values of the encounter loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    pub countdown: CountdownRange,
    pub intro_delay_ms: u64,
    pub taunt_interval_ms: u64,
    pub resolution_delay_ms: u64,
    /// Exploration speed in field units per second.
    pub walk_speed: f32,
    pub messages: MessageConfig,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            countdown: CountdownRange::default(),
            intro_delay_ms: 1800,
            taunt_interval_ms: 2600,
            resolution_delay_ms: 2200,
            walk_speed: 80.0,
            messages: MessageConfig::default(),
        }
    }
}

impl EncounterConfig {
    /// Load a config from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<EncounterConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a config from a RON string. Missing fields take defaults.
    pub fn parse_ron(input: &str) -> Result<EncounterConfig, ConfigError> {
        let config: EncounterConfig = ron::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value that would otherwise fail at runtime, and compile
    /// the message templates.
    pub fn validate(&self) -> Result<Messages, ConfigError> {
        self.countdown.validate()?;
        if self.taunt_interval_ms == 0 {
            return Err(ConfigError::ZeroTauntInterval);
        }
        let messages = Messages::compile(&self.messages)?;
        if !messages.resolution_mentions_weakness() {
            return Err(ConfigError::ResolutionMissingWeakness);
        }
        Ok(messages)
    }

    pub fn intro_delay(&self) -> Duration {
        Duration::from_millis(self.intro_delay_ms)
    }

    pub fn taunt_interval(&self) -> Duration {
        Duration::from_millis(self.taunt_interval_ms)
    }

    pub fn resolution_delay(&self) -> Duration {
        Duration::from_millis(self.resolution_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_design_values() {
        let config = EncounterConfig::default();
        assert_eq!(config.countdown, CountdownRange { min_ms: 4500, max_ms: 7500 });
        assert_eq!(config.intro_delay(), Duration::from_millis(1800));
        assert_eq!(config.taunt_interval(), Duration::from_millis(2600));
        assert_eq!(config.resolution_delay(), Duration::from_millis(2200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_ron_keeps_defaults() {
        let config = EncounterConfig::parse_ron(
            r#"(
                countdown: (min_ms: 1000, max_ms: 2000),
                taunt_interval_ms: 500,
            )"#,
        )
        .unwrap();
        assert_eq!(config.countdown.min_ms, 1000);
        assert_eq!(config.taunt_interval_ms, 500);
        assert_eq!(config.intro_delay_ms, 1800);
        assert_eq!(config.messages, MessageConfig::default());
    }

    #[test]
    fn inverted_range_rejected() {
        let err = EncounterConfig::parse_ron("(countdown: (min_ms: 9000, max_ms: 100))").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidCountdownRange { min_ms: 9000, max_ms: 100 }
        ));
        assert!(CountdownRange::new(1, 0).is_err());
        assert!(CountdownRange::new(5, 5).is_ok());
    }

    #[test]
    fn zero_interval_rejected() {
        let err = EncounterConfig::parse_ron("(taunt_interval_ms: 0)").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTauntInterval));
    }

    #[test]
    fn bad_template_rejected() {
        let err = EncounterConfig::parse_ron(r#"(messages: (taunt: "{name} says {hp}"))"#)
            .unwrap_err();
        match err {
            ConfigError::Template { name, source } => {
                assert_eq!(name, "taunt");
                assert_eq!(source, TemplateError::UnknownField("hp".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn resolution_without_weakness_rejected() {
        let err = EncounterConfig::parse_ron(r#"(messages: (resolution: "You win!"))"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::ResolutionMissingWeakness));

        let config = EncounterConfig::parse_ron(
            r#"(messages: (resolution: "{name} cannot stand {weakness}"))"#,
        )
        .unwrap();
        assert!(config.validate().unwrap().resolution_mentions_weakness());
    }

    #[test]
    fn countdown_contains() {
        let range = CountdownRange::default();
        assert!(range.contains(Duration::from_millis(4500)));
        assert!(range.contains(Duration::from_millis(7500)));
        assert!(!range.contains(Duration::from_millis(7501)));
    }

    #[test]
    fn default_resolution_mentions_weakness() {
        let messages = EncounterConfig::default().validate().unwrap();
        assert!(messages.resolution_mentions_weakness());
    }
}
