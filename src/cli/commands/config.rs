//! Config command handler

use crate::args::ConfigSubcommand;
use degree_planner::config::Config;
use degree_planner::{error, info};
use std::io::{self, Write};

/// Dispatch config subcommands. Returns `false` on failure.
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) -> bool {
    match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key),
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    }
}

/// Print one value, or the whole config with its file location
pub fn handle_config_get(config: &Config, key: Option<String>) -> bool {
    let Some(k) = key else {
        println!("\n=== Configuration ({}) ===\n", Config::get_config_file_path().display());
        print!("{config}");
        return true;
    };

    match config.get(&k) {
        Some(value) => {
            println!("{value}");
            true
        }
        None => {
            eprintln!("✗ Unknown config key: '{k}'");
            false
        }
    }
}

fn persist(config: &Config) -> bool {
    match config.save() {
        Ok(()) => true,
        Err(e) => {
            error!("Failed to save config: {e}");
            eprintln!("✗ Failed to save config: {e}");
            false
        }
    }
}

/// Set a value and write the config file
pub fn handle_config_set(config: &mut Config, key: &str, value: &str) -> bool {
    if let Err(e) = config.set(key, value) {
        eprintln!("✗ {e}");
        return false;
    }
    if !persist(config) {
        return false;
    }

    let stored = config.get(key).unwrap_or_else(|| value.to_string());
    info!("Config {key} set to {stored}");
    println!("✓ Set {key} = {stored}");
    true
}

/// Restore one value from the defaults and write the config file
pub fn handle_config_unset(config: &mut Config, defaults: &Config, key: &str) -> bool {
    if let Err(e) = config.unset(key, defaults) {
        eprintln!("✗ {e}");
        return false;
    }
    if !persist(config) {
        return false;
    }

    println!("✓ Reset {key} to default");
    true
}

/// Delete the config file after confirmation
pub fn handle_config_reset() -> bool {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return true;
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();
    let response = response.trim();

    if !(response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")) {
        println!("✗ Reset cancelled");
        return true;
    }

    match Config::reset() {
        Ok(()) => {
            println!("✓ Config reset to defaults");
            true
        }
        Err(e) => {
            eprintln!("✗ Failed to remove config file: {e}");
            false
        }
    }
}
