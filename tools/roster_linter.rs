/// Roster Linter — validates enemy roster files and message templates.
///
/// Usage: roster_linter <enemies.ron | dir> [--config <path>]

use encounter_loop::core::config::EncounterConfig;
use encounter_loop::core::roster::EnemyRoster;
use encounter_loop::schema::enemy::EnemyDefinition;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: roster_linter <enemies.ron | dir> [--config <path>]");
        process::exit(0);
    }

    let roster_path = Path::new(&args[1]);
    let mut config_path = None;

    let mut i = 2;
    while i < args.len() {
        if args[i] == "--config" && i + 1 < args.len() {
            i += 1;
            config_path = Some(args[i].clone());
        }
        i += 1;
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let config = match config_path {
        Some(ref path) => match EncounterConfig::load_from_ron(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("ERROR: Failed to load config {}: {}", path, e);
                process::exit(1);
            }
        },
        None => EncounterConfig::default(),
    };
    if let Err(e) = config.validate() {
        errors.push(format!("config: {}", e));
    }

    let files = if roster_path.is_file() {
        vec![roster_path.to_path_buf()]
    } else if roster_path.is_dir() {
        collect_ron_files(roster_path)
    } else {
        eprintln!("ERROR: Path '{}' does not exist", roster_path.display());
        process::exit(1);
    };

    for path in &files {
        match EnemyRoster::load_from_ron(path) {
            Ok(roster) => {
                println!("  Loaded: {} ({} enemies)", path.display(), roster.len());
                for enemy in roster.iter() {
                    lint_enemy(enemy, &mut warnings);
                }
            }
            Err(e) => errors.push(format!("{}: {}", path.display(), e)),
        }
    }

    println!("\n=== Roster Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_enemy(enemy: &EnemyDefinition, warnings: &mut Vec<String>) {
    let fields = [
        ("name", &enemy.name),
        ("sprite", &enemy.sprite),
        ("appearance", &enemy.appearance),
        ("trait", &enemy.trait_text),
        ("weakness", &enemy.weakness),
        ("quote", &enemy.quote),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            warnings.push(format!("{}: empty {}", enemy.id, field));
        }
    }

    if enemy.taunts.is_empty() {
        warnings.push(format!("{}: no taunts, enemy will stay silent", enemy.id));
    }
    for (i, taunt) in enemy.taunts.iter().enumerate() {
        if taunt.trim().is_empty() {
            warnings.push(format!("{}: taunt #{} is blank", enemy.id, i));
        }
    }
}

fn collect_ron_files(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_ron_files(&path));
            } else if path.extension().and_then(|s| s.to_str()) == Some("ron") {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}
