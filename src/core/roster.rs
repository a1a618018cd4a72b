/// Enemy and party rosters — loading, validation, and random selection.

use rustc_hash::{FxHashMap, FxHashSet};
use std::path::Path;
use thiserror::Error;

use crate::core::random::RandomSource;
use crate::schema::enemy::{EnemyDefinition, EnemyId};
use crate::schema::party::PartyMember;

const BUILTIN_ENEMIES: &str = include_str!("../../data/enemies.ron");
const BUILTIN_PARTY: &str = include_str!("../../data/party.ron");

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("enemy roster is empty")]
    Empty,
    #[error("duplicate enemy id: {0}")]
    DuplicateId(EnemyId),
}

/// The fixed catalog of enemies an encounter can draw from.
///
/// Never empty; construction fails otherwise.
#[derive(Debug, Clone)]
pub struct EnemyRoster {
    enemies: Vec<EnemyDefinition>,
    index: FxHashMap<EnemyId, usize>,
}

impl EnemyRoster {
    pub fn new(enemies: Vec<EnemyDefinition>) -> Result<EnemyRoster, RosterError> {
        if enemies.is_empty() {
            return Err(RosterError::Empty);
        }

        let mut index = FxHashMap::default();
        for (i, enemy) in enemies.iter().enumerate() {
            if index.insert(enemy.id.clone(), i).is_some() {
                return Err(RosterError::DuplicateId(enemy.id.clone()));
            }
        }

        Ok(EnemyRoster { enemies, index })
    }

    /// The three enemies shipped with the crate.
    pub fn builtin() -> Result<EnemyRoster, RosterError> {
        Self::parse_ron(BUILTIN_ENEMIES)
    }

    /// Load a roster from a RON file holding a list of enemies.
    pub fn load_from_ron(path: &Path) -> Result<EnemyRoster, RosterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a roster from a RON string.
    pub fn parse_ron(input: &str) -> Result<EnemyRoster, RosterError> {
        let enemies: Vec<EnemyDefinition> = ron::from_str(input)?;
        Self::new(enemies)
    }

    /// Uniform pick over the roster.
    pub fn pick_random(&self, rng: &mut dyn RandomSource) -> &EnemyDefinition {
        let i = rng.pick_index(self.enemies.len());
        &self.enemies[i.min(self.enemies.len() - 1)]
    }

    pub fn get(&self, id: &EnemyId) -> Option<&EnemyDefinition> {
        self.index.get(id).map(|&i| &self.enemies[i])
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Always false for a constructed roster.
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnemyDefinition> {
        self.enemies.iter()
    }

    /// Ids of enemies without any taunt lines.
    pub fn silent_enemies(&self) -> FxHashSet<&EnemyId> {
        self.enemies
            .iter()
            .filter(|enemy| !enemy.has_taunts())
            .map(|enemy| &enemy.id)
            .collect()
    }
}

/// The party shown in the status panel. May be empty.
#[derive(Debug, Clone, Default)]
pub struct PartyRoster {
    members: Vec<PartyMember>,
}

impl PartyRoster {
    pub fn new(members: Vec<PartyMember>) -> Self {
        Self { members }
    }

    pub fn builtin() -> Result<PartyRoster, RosterError> {
        Self::parse_ron(BUILTIN_PARTY)
    }

    pub fn load_from_ron(path: &Path) -> Result<PartyRoster, RosterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<PartyRoster, RosterError> {
        let members: Vec<PartyMember> = ron::from_str(input)?;
        Ok(Self::new(members))
    }

    pub fn members(&self) -> &[PartyMember] {
        &self.members
    }

    /// Formatted rows for the party panel.
    pub fn status_lines(&self) -> Vec<String> {
        self.members.iter().map(PartyMember::status_line).collect()
    }
}
