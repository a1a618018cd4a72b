//! Plain data shared between the encounter loop and its collaborators.

pub mod command;
pub mod enemy;
pub mod party;
