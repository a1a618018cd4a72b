//! WASM bindings for encounter-loop — drives the encounter state machine
//! from a browser game loop.

use std::time::Duration;
use wasm_bindgen::prelude::*;

use encounter_loop::core::config::EncounterConfig;
use encounter_loop::core::encounter::{EncounterMachine, FrameInput};
use encounter_loop::core::movement::MovementInput;
use encounter_loop::core::roster::EnemyRoster;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Deserialize, Default)]
#[serde(default)]
struct FrameJson {
    delta_ms: f64,
    action: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl FrameJson {
    fn to_input(&self) -> Result<FrameInput, JsError> {
        let delta = frame_delta(self.delta_ms)
            .ok_or_else(|| JsError::new(&format!("Invalid delta_ms: {}", self.delta_ms)))?;
        let input = FrameInput::new(delta).with_movement(MovementInput {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
        });
        Ok(if self.action {
            input.with_action()
        } else {
            input
        })
    }
}

/// Negative and NaN deltas clamp to zero; deltas too large for a `Duration`
/// are rejected.
fn frame_delta(delta_ms: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(delta_ms.max(0.0) / 1000.0).ok()
}

#[derive(serde::Serialize)]
struct StatusJson {
    state: &'static str,
    countdown_ms: Option<u64>,
    enemy_id: Option<String>,
    taunt_cursor: Option<usize>,
    encounters_started: u64,
}

// ---------------------------------------------------------------------------
// EncounterLoop: the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct EncounterLoop {
    machine: EncounterMachine,
}

#[wasm_bindgen]
impl EncounterLoop {
    /// Create a loop with the built-in rosters. `seed` of `None` seeds from
    /// the browser's entropy source.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> Result<EncounterLoop, JsError> {
        let mut builder = EncounterMachine::builder();
        if let Some(seed) = seed {
            builder = builder.seed(seed);
        }
        let machine = builder
            .build()
            .map_err(|e| JsError::new(&format!("Encounter loop build error: {e}")))?;
        Ok(EncounterLoop { machine })
    }

    /// Create a loop from RON sources for the config and the enemy roster.
    pub fn with_data(
        config_ron: &str,
        enemies_ron: &str,
        seed: Option<u64>,
    ) -> Result<EncounterLoop, JsError> {
        let config = EncounterConfig::parse_ron(config_ron)
            .map_err(|e| JsError::new(&format!("Config error: {e}")))?;
        let enemies = EnemyRoster::parse_ron(enemies_ron)
            .map_err(|e| JsError::new(&format!("Roster error: {e}")))?;

        let mut builder = EncounterMachine::builder().config(config).enemies(enemies);
        if let Some(seed) = seed {
            builder = builder.seed(seed);
        }
        let machine = builder
            .build()
            .map_err(|e| JsError::new(&format!("Encounter loop build error: {e}")))?;
        Ok(EncounterLoop { machine })
    }

    /// Advance one frame. Takes a JSON frame and returns the JSON frame
    /// output (state, velocity, commands).
    ///
    /// Expected JSON shape:
    /// ```json
    /// { "delta_ms": 16.6, "action": false, "left": true, "up": false }
    /// ```
    pub fn tick(&mut self, frame_json: &str) -> Result<String, JsError> {
        let frame: FrameJson = serde_json::from_str(frame_json)
            .map_err(|e| JsError::new(&format!("Invalid frame JSON: {e}")))?;
        let output = self.machine.tick(&frame.to_input()?);
        serde_json::to_string(&output).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Tear down the current encounter. Returns the resulting commands as JSON.
    pub fn abort(&mut self) -> Result<String, JsError> {
        self.machine.abort_encounter();
        serde_json::to_string(&self.machine.drain_commands())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Snapshot of the loop for debug overlays.
    pub fn status(&self) -> Result<String, JsError> {
        let session = self.machine.session();
        let status = StatusJson {
            state: self.machine.state().name(),
            countdown_ms: self.machine.countdown().map(|d| d.as_millis() as u64),
            enemy_id: session.map(|s| s.enemy().id.to_string()),
            taunt_cursor: session.map(|s| s.taunt_cursor()),
            encounters_started: self.machine.encounters_started(),
        };
        serde_json::to_string(&status).map_err(|e| JsError::new(&e.to_string()))
    }

    /// The party roster as JSON.
    pub fn party(&self) -> Result<String, JsError> {
        serde_json::to_string(self.machine.party().members())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// The enemy roster as JSON, for preloading sprites.
    pub fn enemies(&self) -> Result<String, JsError> {
        let enemies: Vec<_> = self.machine.enemies().iter().collect();
        serde_json::to_string(&enemies).map_err(|e| JsError::new(&e.to_string()))
    }
}
