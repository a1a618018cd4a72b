//! The encounter state machine: Exploring → Intro → AwaitingAction →
//! Resolving → Exploring.
//!
//! Wires together the scheduler, the taunt cycler, the rosters, and the
//! timer queue, and turns each frame into a list of presentation commands.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::core::config::{ConfigError, EncounterConfig, Messages};
use crate::core::movement::{MovementInput, Velocity};
use crate::core::random::{RandomSource, SeededRandom};
use crate::core::roster::{EnemyRoster, PartyRoster, RosterError};
use crate::core::scheduler::EncounterScheduler;
use crate::core::taunt::TauntCycler;
use crate::core::timer::{Fired, TimerHandle, TimerQueue};
use crate::schema::command::{BattleElement, EncounterView, PresentationCommand};
use crate::schema::enemy::EnemyDefinition;

#[derive(Debug, Error)]
pub enum EncounterError {
    #[error("roster error: {0}")]
    Roster(#[from] RosterError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Where the loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterState {
    Exploring,
    Intro,
    AwaitingAction,
    Resolving,
}

impl EncounterState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exploring => "exploring",
            Self::Intro => "intro",
            Self::AwaitingAction => "awaiting_action",
            Self::Resolving => "resolving",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EncounterTimer {
    IntroElapsed,
    Taunt,
    ResolutionElapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Intro { timer: TimerHandle },
    AwaitingAction,
    Resolving { timer: TimerHandle },
}

/// Battle-only presentation state revealed during one encounter. Released
/// exactly once, when the encounter ends.
#[derive(Debug, Clone, Default)]
pub struct BattleScope {
    elements: Vec<BattleElement>,
}

impl BattleScope {
    fn reveal(&mut self, element: BattleElement) {
        if !self.elements.contains(&element) {
            self.elements.push(element);
        }
    }

    pub fn elements(&self) -> &[BattleElement] {
        &self.elements
    }

    fn release(&mut self) -> Vec<BattleElement> {
        std::mem::take(&mut self.elements)
    }
}

/// Everything that lives exactly as long as one encounter.
#[derive(Debug, Clone)]
pub struct EncounterSession {
    serial: u64,
    enemy: EnemyDefinition,
    phase: Phase,
    cycler: TauntCycler,
    scope: BattleScope,
}

impl EncounterSession {
    /// 1-based count of encounters started by the owning machine.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn enemy(&self) -> &EnemyDefinition {
        &self.enemy
    }

    pub fn state(&self) -> EncounterState {
        match self.phase {
            Phase::Intro { .. } => EncounterState::Intro,
            Phase::AwaitingAction => EncounterState::AwaitingAction,
            Phase::Resolving { .. } => EncounterState::Resolving,
        }
    }

    /// True only while the player's action would be accepted.
    pub fn awaiting_action(&self) -> bool {
        self.phase == Phase::AwaitingAction
    }

    pub fn taunt_cursor(&self) -> usize {
        self.cycler.cursor()
    }

    pub fn is_taunting(&self) -> bool {
        self.cycler.is_active()
    }

    pub fn battle_scope(&self) -> &BattleScope {
        &self.scope
    }
}

enum Encounter {
    Idle,
    InEncounter(EncounterSession),
}

/// One frame of input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub delta: Duration,
    /// Edge-triggered: true only on the frame the action key went down.
    pub action_pressed: bool,
    pub movement: MovementInput,
}

impl FrameInput {
    pub fn new(delta: Duration) -> Self {
        Self {
            delta,
            ..Default::default()
        }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn with_action(mut self) -> Self {
        self.action_pressed = true;
        self
    }

    pub fn with_movement(mut self, movement: MovementInput) -> Self {
        self.movement = movement;
        self
    }
}

/// What a frame produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub state: EncounterState,
    pub velocity: Velocity,
    pub commands: Vec<PresentationCommand>,
}

/// The top-level encounter loop. Built via `EncounterMachine::builder()`.
pub struct EncounterMachine {
    config: EncounterConfig,
    messages: Messages,
    enemies: EnemyRoster,
    party: PartyRoster,
    rng: Box<dyn RandomSource>,
    scheduler: EncounterScheduler,
    timers: TimerQueue<EncounterTimer>,
    encounter: Encounter,
    outbox: Vec<PresentationCommand>,
    encounters_started: u64,
}

/// Builder for constructing an `EncounterMachine`.
#[derive(Default)]
pub struct EncounterMachineBuilder {
    seed: Option<u64>,
    config: Option<EncounterConfig>,
    config_path: Option<String>,
    enemies: Option<EnemyRoster>,
    enemies_path: Option<String>,
    party: Option<PartyRoster>,
    party_path: Option<String>,
    random: Option<Box<dyn RandomSource>>,
}

impl EncounterMachine {
    pub fn builder() -> EncounterMachineBuilder {
        EncounterMachineBuilder::default()
    }

    /// Advance the loop by one frame.
    ///
    /// Timers due within `delta` fire first, in due order. Then, if the loop
    /// was exploring for the whole frame, the scheduler counts down and may
    /// start an encounter. Finally the action input is offered to the
    /// current state.
    pub fn tick(&mut self, input: &FrameInput) -> FrameOutput {
        let was_exploring = self.is_exploring();

        self.timers.advance(input.delta);
        while let Some(fired) = self.timers.pop_due() {
            self.on_timer(fired);
        }

        if was_exploring && self.is_exploring() && self.scheduler.tick(input.delta) {
            self.start_encounter();
        }

        if input.action_pressed {
            self.press_action();
        }

        FrameOutput {
            state: self.state(),
            velocity: self.velocity(&input.movement),
            commands: self.drain_commands(),
        }
    }

    /// Offer the player's action to the current state. Returns true if it
    /// resolved the battle; anywhere but `AwaitingAction` it is ignored.
    pub fn press_action(&mut self) -> bool {
        let Encounter::InEncounter(session) = &mut self.encounter else {
            debug!("action ignored while exploring");
            return false;
        };
        if session.phase != Phase::AwaitingAction {
            debug!(state = session.state().name(), "action ignored");
            return false;
        }

        session.cycler.stop(&mut self.timers);
        self.outbox.push(PresentationCommand::HideTaunt);
        self.outbox.push(PresentationCommand::ShowResolution {
            text: self.messages.resolution(&session.enemy),
            prompt: self.messages.victory_prompt(&session.enemy),
        });

        let timer = self
            .timers
            .schedule(self.config.resolution_delay(), EncounterTimer::ResolutionElapsed);
        session.phase = Phase::Resolving { timer };

        info!(
            encounter = session.serial,
            enemy = %session.enemy.id,
            taunt_cursor = session.cycler.cursor(),
            "encounter resolved"
        );
        true
    }

    /// Tear down the running encounter immediately and go back to exploring.
    /// Returns false, doing nothing, when already exploring.
    pub fn abort_encounter(&mut self) -> bool {
        if self.is_exploring() {
            return false;
        }
        info!("encounter aborted");
        self.end_encounter();
        true
    }

    /// Commands queued by calls made outside `tick`.
    pub fn drain_commands(&mut self) -> Vec<PresentationCommand> {
        std::mem::take(&mut self.outbox)
    }

    pub fn state(&self) -> EncounterState {
        match &self.encounter {
            Encounter::Idle => EncounterState::Exploring,
            Encounter::InEncounter(session) => session.state(),
        }
    }

    pub fn is_exploring(&self) -> bool {
        matches!(self.encounter, Encounter::Idle)
    }

    pub fn session(&self) -> Option<&EncounterSession> {
        match &self.encounter {
            Encounter::Idle => None,
            Encounter::InEncounter(session) => Some(session),
        }
    }

    /// Time left before the next encounter; `None` during battle.
    pub fn countdown(&self) -> Option<Duration> {
        self.scheduler.remaining()
    }

    /// Velocity for this frame's movement input. Zero outside exploration.
    pub fn velocity(&self, movement: &MovementInput) -> Velocity {
        if self.is_exploring() {
            movement.velocity(self.config.walk_speed)
        } else {
            Velocity::ZERO
        }
    }

    /// Virtual time elapsed since the machine was built.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Timers still scheduled. Zero whenever the loop is exploring.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn encounters_started(&self) -> u64 {
        self.encounters_started
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    pub fn enemies(&self) -> &EnemyRoster {
        &self.enemies
    }

    pub fn party(&self) -> &PartyRoster {
        &self.party
    }

    fn on_timer(&mut self, fired: Fired<EncounterTimer>) {
        let Encounter::InEncounter(session) = &mut self.encounter else {
            debug!(event = ?fired.event, "timer fired while exploring; ignored");
            return;
        };

        match (fired.event, session.phase) {
            (EncounterTimer::IntroElapsed, Phase::Intro { timer }) if timer == fired.handle => {
                session.phase = Phase::AwaitingAction;
                let taunting = session.cycler.start(
                    &session.enemy,
                    &mut self.timers,
                    self.config.taunt_interval(),
                    EncounterTimer::Taunt,
                );
                debug!(encounter = session.serial, taunting, "awaiting player action");
            }
            (EncounterTimer::Taunt, Phase::AwaitingAction)
                if session.cycler.timer() == Some(fired.handle) =>
            {
                if let Some(line) = session.cycler.next_line() {
                    trace!(encounter = session.serial, line = %line, "taunt");
                    let text = self.messages.taunt(&session.enemy, &line);
                    self.outbox.push(PresentationCommand::ShowTaunt { line, text });
                }
            }
            (EncounterTimer::ResolutionElapsed, Phase::Resolving { timer })
                if timer == fired.handle =>
            {
                self.end_encounter();
            }
            (event, _) => {
                debug!(?event, state = session.state().name(), "stale timer ignored");
            }
        }
    }

    fn start_encounter(&mut self) {
        debug_assert!(self.is_exploring(), "encounter started during battle");

        let enemy = self.enemies.pick_random(self.rng.as_mut()).clone();
        self.encounters_started += 1;

        let mut scope = BattleScope::default();
        for element in BattleElement::INTRO_LAYOUT {
            scope.reveal(element);
        }

        self.outbox.push(PresentationCommand::ShowEnemyIntro(EncounterView {
            dialogue: self.messages.intro(&enemy),
            info: self.messages.info(&enemy),
            prompt: self.messages.action_prompt(&enemy),
            party: self.party.status_lines(),
            enemy: enemy.clone(),
        }));

        let timer = self
            .timers
            .schedule(self.config.intro_delay(), EncounterTimer::IntroElapsed);

        info!(
            encounter = self.encounters_started,
            enemy = %enemy.id,
            at_ms = self.timers.now().as_millis() as u64,
            "encounter started"
        );

        self.encounter = Encounter::InEncounter(EncounterSession {
            serial: self.encounters_started,
            cycler: TauntCycler::new(&enemy),
            enemy,
            phase: Phase::Intro { timer },
            scope,
        });
    }

    fn end_encounter(&mut self) {
        let Encounter::InEncounter(mut session) =
            std::mem::replace(&mut self.encounter, Encounter::Idle)
        else {
            return;
        };

        session.cycler.stop(&mut self.timers);
        match session.phase {
            Phase::Intro { timer } | Phase::Resolving { timer } => {
                self.timers.cancel(timer);
            }
            Phase::AwaitingAction => {}
        }

        self.outbox.push(PresentationCommand::ClearBattleUi {
            released: session.scope.release(),
        });

        let countdown = self.scheduler.rearm(self.rng.as_mut());
        info!(
            encounter = session.serial,
            next_encounter_ms = countdown.as_millis() as u64,
            "back to exploring"
        );
    }

    fn enter_exploring(&mut self) {
        let countdown = self.scheduler.rearm(self.rng.as_mut());
        debug!(next_encounter_ms = countdown.as_millis() as u64, "exploring");
    }
}

impl EncounterMachineBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(mut self, config: EncounterConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn config_path(mut self, path: &str) -> Self {
        self.config_path = Some(path.to_string());
        self
    }

    pub fn enemies(mut self, roster: EnemyRoster) -> Self {
        self.enemies = Some(roster);
        self
    }

    pub fn enemies_path(mut self, path: &str) -> Self {
        self.enemies_path = Some(path.to_string());
        self
    }

    pub fn party(mut self, roster: PartyRoster) -> Self {
        self.party = Some(roster);
        self
    }

    pub fn party_path(mut self, path: &str) -> Self {
        self.party_path = Some(path.to_string());
        self
    }

    /// Replace the seeded RNG, e.g. with a `FixedRandom` for replays.
    pub fn random_source(mut self, source: Box<dyn RandomSource>) -> Self {
        self.random = Some(source);
        self
    }

    /// Directly provided values win over paths; anything missing falls back
    /// to the built-in data and default config.
    pub fn build(self) -> Result<EncounterMachine, EncounterError> {
        let config = match (self.config, self.config_path) {
            (Some(config), _) => config,
            (None, Some(path)) => EncounterConfig::load_from_ron(Path::new(&path))?,
            (None, None) => EncounterConfig::default(),
        };
        let messages = config.validate()?;

        let enemies = match (self.enemies, self.enemies_path) {
            (Some(roster), _) => roster,
            (None, Some(path)) => EnemyRoster::load_from_ron(Path::new(&path))?,
            (None, None) => EnemyRoster::builtin()?,
        };

        let party = match (self.party, self.party_path) {
            (Some(roster), _) => roster,
            (None, Some(path)) => PartyRoster::load_from_ron(Path::new(&path))?,
            (None, None) => PartyRoster::builtin()?,
        };

        let rng: Box<dyn RandomSource> = match (self.random, self.seed) {
            (Some(source), _) => source,
            (None, Some(seed)) => Box::new(SeededRandom::new(seed)),
            (None, None) => Box::new(SeededRandom::from_entropy()),
        };

        let mut machine = EncounterMachine {
            scheduler: EncounterScheduler::new(config.countdown),
            config,
            messages,
            enemies,
            party,
            rng,
            timers: TimerQueue::new(),
            encounter: Encounter::Idle,
            outbox: Vec::new(),
            encounters_started: 0,
        };
        machine.enter_exploring();
        Ok(machine)
    }
}
