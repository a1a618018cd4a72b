//! Encounter Loop — random encounters for top-down exploration games.
//!
//! A tick-driven state machine that counts down while the player explores,
//! reveals a random enemy, cycles its taunts until the player attacks, and
//! hands control back to exploration. Rendering is left to the caller, who
//! receives a list of presentation commands every frame.

pub mod core;
pub mod schema;

pub use crate::core::encounter::{
    EncounterError, EncounterMachine, EncounterMachineBuilder, EncounterState, FrameInput,
    FrameOutput,
};
pub use crate::schema::command::{PresentationCommand, Presenter};
