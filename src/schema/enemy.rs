use serde::{Deserialize, Serialize};
use std::fmt;

/// Newtype wrapper for enemy identifiers (e.g. `"syntax-error"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyId(pub String);

impl EnemyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EnemyId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// An enemy that can be met in a random encounter.
///
/// Definitions are immutable once loaded. The flavor strings are shown in the
/// info panel, `weakness` also drives the resolution message. `taunts` are
/// replayed cyclically while the enemy waits for the player; an empty list
/// means the enemy never taunts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDefinition {
    pub id: EnemyId,
    pub name: String,
    pub sprite: String,
    pub appearance: String,
    #[serde(rename = "trait")]
    pub trait_text: String,
    pub weakness: String,
    pub quote: String,
    #[serde(default)]
    pub taunts: Vec<String>,
}

impl EnemyDefinition {
    /// Returns true if this enemy has at least one taunt line.
    pub fn has_taunts(&self) -> bool {
        !self.taunts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_enemy(taunts: &[&str]) -> EnemyDefinition {
        EnemyDefinition {
            id: EnemyId::from("syntax-error"),
            name: "Syntax Error".to_string(),
            sprite: "enemy-syntax-error".to_string(),
            appearance: "Jagged red waveforms".to_string(),
            trait_text: "Never misses a typo".to_string(),
            weakness: "careful linting".to_string(),
            quote: "Forgot a semicolon?".to_string(),
            taunts: taunts.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn has_taunts_reflects_list() {
        assert!(make_enemy(&["A", "B"]).has_taunts());
        assert!(!make_enemy(&[]).has_taunts());
    }

    #[test]
    fn enemy_id_display() {
        let id = EnemyId::from("null-pointer");
        assert_eq!(id.to_string(), "null-pointer");
        assert_eq!(id.as_str(), "null-pointer");
    }

    #[test]
    fn trait_field_uses_ron_name() {
        let ron_text = r#"(
            id: "race-condition",
            name: "Race Condition",
            sprite: "enemy-race-condition",
            appearance: "Afterimages",
            trait: "Speed freak",
            weakness: "locks",
            quote: "First come, first served!",
        )"#;
        let enemy: EnemyDefinition = ron::from_str(ron_text).unwrap();
        assert_eq!(enemy.trait_text, "Speed freak");
        assert!(enemy.taunts.is_empty());
    }
}
