//! The encounter loop runtime.

pub mod config;
pub mod encounter;
pub mod movement;
pub mod random;
pub mod roster;
pub mod scheduler;
pub mod taunt;
pub mod template;
pub mod timer;
