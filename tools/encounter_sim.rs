/// Encounter Sim — headless driver for the encounter loop.
///
/// Usage: encounter_sim [--seed <n>] [--delta <ms>] [--duration <ms>]
///                      [--reaction <ms>] [--config <path>] [--enemies <path>]
///
/// Runs the loop at a fixed frame delta, presses the action key `--reaction`
/// milliseconds after the enemy starts waiting, and prints every presentation
/// command. Set RUST_LOG=encounter_loop=debug for state machine tracing.

use encounter_loop::core::encounter::{EncounterMachine, EncounterState, FrameInput};
use encounter_loop::schema::command::{BattleElement, EncounterView, Presenter};
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

struct TerminalPresenter {
    clock: Duration,
}

impl TerminalPresenter {
    fn stamp(&self) -> String {
        format!("[{:>8.3}s]", self.clock.as_secs_f64())
    }
}

impl Presenter for TerminalPresenter {
    fn show_enemy_intro(&mut self, view: EncounterView) {
        println!("{} === {} ({}) ===", self.stamp(), view.enemy.name, view.enemy.id);
        for line in view.dialogue.lines() {
            println!("{}   {}", self.stamp(), line);
        }
        for line in view.info.lines() {
            println!("{}   | {}", self.stamp(), line);
        }
        for row in &view.party {
            println!("{}   # {}", self.stamp(), row);
        }
        println!("{}   > {}", self.stamp(), view.prompt);
    }

    fn show_taunt(&mut self, _line: &str, text: &str) {
        println!("{}   ~ {}", self.stamp(), text);
    }

    fn hide_taunt(&mut self) {}

    fn show_resolution(&mut self, text: &str, prompt: &str) {
        for line in text.lines() {
            println!("{}   {}", self.stamp(), line);
        }
        println!("{}   > {}", self.stamp(), prompt);
    }

    fn clear_battle_ui(&mut self, released: &[BattleElement]) {
        println!("{} --- back to exploring ({} elements released)", self.stamp(), released.len());
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut seed: Option<u64> = None;
    let mut delta_ms: u64 = 16;
    let mut duration_ms: u64 = 60_000;
    let mut reaction_ms: u64 = 3_000;
    let mut config_path = None;
    let mut enemies_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return;
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().ok();
            }
            "--delta" if i + 1 < args.len() => {
                i += 1;
                delta_ms = args[i].parse().unwrap_or(16).max(1);
            }
            "--duration" if i + 1 < args.len() => {
                i += 1;
                duration_ms = args[i].parse().unwrap_or(60_000);
            }
            "--reaction" if i + 1 < args.len() => {
                i += 1;
                reaction_ms = args[i].parse().unwrap_or(3_000);
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            "--enemies" if i + 1 < args.len() => {
                i += 1;
                enemies_path = Some(args[i].clone());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut builder = EncounterMachine::builder();
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    if let Some(ref path) = config_path {
        builder = builder.config_path(path);
    }
    if let Some(ref path) = enemies_path {
        builder = builder.enemies_path(path);
    }

    let mut machine = match builder.build() {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let mut presenter = TerminalPresenter {
        clock: Duration::ZERO,
    };
    let delta = Duration::from_millis(delta_ms);
    let reaction = Duration::from_millis(reaction_ms);
    let mut waiting_since: Option<Duration> = None;

    println!(
        "Simulating {}s at {}ms/frame, first encounter in {:?}",
        duration_ms / 1000,
        delta_ms,
        machine.countdown().unwrap_or_default()
    );

    while presenter.clock.as_millis() < duration_ms as u128 {
        let press = waiting_since.is_some_and(|since| presenter.clock - since >= reaction);
        let input = if press {
            FrameInput::new(delta).with_action()
        } else {
            FrameInput::new(delta)
        };

        let output = machine.tick(&input);
        presenter.clock = machine.now();
        for command in output.commands {
            command.dispatch(&mut presenter);
        }

        waiting_since = match (output.state, waiting_since) {
            (EncounterState::AwaitingAction, Some(since)) => Some(since),
            (EncounterState::AwaitingAction, None) => Some(presenter.clock),
            _ => None,
        };
    }

    println!("\nEncounters started: {}", machine.encounters_started());
}

fn print_usage() {
    println!("Usage: encounter_sim [--seed <n>] [--delta <ms>] [--duration <ms>]");
    println!("                     [--reaction <ms>] [--config <path>] [--enemies <path>]");
}
