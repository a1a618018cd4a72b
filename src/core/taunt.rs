/// Taunt cycler — repeats an enemy's taunt lines while it waits for the
/// player to act.

use std::sync::Arc;
use std::time::Duration;

use crate::core::timer::{TimerHandle, TimerQueue};
use crate::schema::enemy::EnemyDefinition;

/// A lazy, endless walk over a taunt list. Yields nothing for an empty list.
#[derive(Debug, Clone)]
pub struct TauntLines {
    lines: Arc<[String]>,
    cursor: usize,
}

impl TauntLines {
    pub fn new(enemy: &EnemyDefinition) -> Self {
        Self {
            lines: enemy.taunts.iter().cloned().collect(),
            cursor: 0,
        }
    }

    /// Index of the next line to emit.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn restart(&mut self) {
        self.cursor = 0;
    }
}

impl Iterator for TauntLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.lines.is_empty() {
            return None;
        }
        let line = self.lines[self.cursor % self.lines.len()].clone();
        self.cursor = (self.cursor + 1) % self.lines.len();
        Some(line)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclerState {
    Idle,
    Active(TimerHandle),
    Stopped,
}

/// Owns the repeating taunt timer and the taunt cursor for one encounter.
#[derive(Debug, Clone)]
pub struct TauntCycler {
    state: CyclerState,
    lines: TauntLines,
}

impl TauntCycler {
    pub fn new(enemy: &EnemyDefinition) -> Self {
        Self {
            state: CyclerState::Idle,
            lines: TauntLines::new(enemy),
        }
    }

    pub fn state(&self) -> CyclerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, CyclerState::Active(_))
    }

    /// The timer currently driving this cycler, if any.
    pub fn timer(&self) -> Option<TimerHandle> {
        match self.state {
            CyclerState::Active(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn cursor(&self) -> usize {
        self.lines.cursor()
    }

    /// Start taunting `enemy` every `interval`. A running timer is torn down
    /// and rebuilt with the cursor rewound. Returns false, staying idle, when
    /// the enemy has no taunts.
    pub fn start<E: Clone>(
        &mut self,
        enemy: &EnemyDefinition,
        timers: &mut TimerQueue<E>,
        interval: Duration,
        event: E,
    ) -> bool {
        self.stop(timers);
        self.lines = TauntLines::new(enemy);
        if !enemy.has_taunts() {
            self.state = CyclerState::Idle;
            return false;
        }
        self.state = CyclerState::Active(timers.schedule_repeating(interval, event));
        true
    }

    /// Cancel the repeating timer. Safe to call in any state.
    pub fn stop<E: Clone>(&mut self, timers: &mut TimerQueue<E>) {
        if let CyclerState::Active(handle) = self.state {
            timers.cancel(handle);
            self.state = CyclerState::Stopped;
        }
    }

    /// Advance the cursor and return the line to show.
    pub fn next_line(&mut self) -> Option<String> {
        self.lines.next()
    }

    /// A fresh walk over the same lines, from the top.
    pub fn lines(&self) -> TauntLines {
        let mut lines = self.lines.clone();
        lines.restart();
        lines
    }
}
