//! Mass-action CLI - Evaluate reaction propensities from JSON configuration.

use std::path::PathBuf;
use std::time::Instant;

use log::info;

use mass_action::{NetworkConfig, ReactionNetwork};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <network.json>", args[0]);
        eprintln!();
        eprintln!("Evaluate mass-action propensities of a reaction network.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  network.json  Reactions and the state to evaluate them in");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);

    let config = NetworkConfig::from_path(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading {}: {}", config_path.display(), e);
        std::process::exit(1);
    });

    let network = ReactionNetwork::from_config(&config).unwrap_or_else(|e| {
        eprintln!("Error building network: {}", e);
        std::process::exit(1);
    });

    info!(
        "Loaded {} channels, {} species in state",
        network.len(),
        config.state.len()
    );

    let start = Instant::now();
    let propensities = network.propensities(&config.state);
    let elapsed = start.elapsed();

    let width = network
        .channels()
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0);

    println!("Propensities");
    println!("============");
    for (channel, a) in network.channels().iter().zip(&propensities) {
        println!("  {:<width$}  {}", channel.name, a, width = width);
    }
    println!();
    println!("Total: {}", propensities.iter().sum::<f64>());

    info!("Evaluated in {:.3?}", elapsed);
}

fn print_example_config() {
    let config = NetworkConfig::default();

    println!("Example configuration (network.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error serializing example: {}", e);
            std::process::exit(1);
        }
    }
}
