//! CLI surface named in spec.md §6: `dump` (CFI dump), `changes` (CFI
//! diff loop), `discover`. Treated as an ambient, lightly-developed
//! external collaborator — spec.md's core is the library, not this
//! binary. Ground truth: `examples/original_source/luxtronik/__main__.py`
//! and `scripts/dump-luxtronik.py`/`scripts/dump-changes.py`.

use std::time::Duration;

use clap::{Parser, Subcommand};
use luxtronik::config::{ConnectionConfig, VersionSelector};
use luxtronik::Luxtronik;
use serde_json::json;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about = "Luxtronik heat-pump CFI/SHI client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// One-shot dump of every parameter, calculation, and visibility.
    Dump { ip: String, port: Option<u16> },
    /// Poll calculations repeatedly, printing only the fields that changed.
    Changes { ip: String, port: Option<u16> },
    /// Broadcast UDP discovery and print the first responder.
    Discover,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let code = match cli.command {
        Command::Dump { ip, port } => run_dump(ip, port).await,
        Command::Changes { ip, port } => run_changes(ip, port).await,
        Command::Discover => run_discover().await,
    };
    std::process::exit(code);
}

fn config_for(ip: String, port: Option<u16>) -> ConnectionConfig {
    ConnectionConfig {
        host: ip,
        cfi_port: port.unwrap_or(luxtronik::cfi::DEFAULT_PORT),
        shi_port: luxtronik::shi::DEFAULT_PORT,
        modbus_timeout_secs: luxtronik::shi::DEFAULT_TIMEOUT.as_secs(),
        version: VersionSelector::Detect,
        safe: true,
    }
}

async fn run_dump(ip: String, port: Option<u16>) -> i32 {
    let config = config_for(ip, port);
    let facade = Luxtronik::connect(&config).await;
    let mut parameters = facade.new_parameters();
    let mut calculations = facade.new_calculations();
    let mut visibilities = facade.new_visibilities();

    let ok = facade.read(&mut parameters).await && facade.read(&mut calculations).await && facade.read(&mut visibilities).await;
    if !ok {
        error!(host = facade.host(), "dump failed: one or more CFI reads did not complete");
        return 1;
    }

    for (label, vector) in [("parameters", &parameters), ("calculations", &calculations), ("visibilities", &visibilities)] {
        for (def, field) in vector.iter() {
            println!("{}", json!({
                "class": label,
                "name": def.preferred_name(),
                "index": def.index,
                "value": field.value().map(|v| format!("{:?}", v)),
            }));
        }
    }
    0
}

async fn run_changes(ip: String, port: Option<u16>) -> i32 {
    let config = config_for(ip, port);
    let facade = Luxtronik::connect(&config).await;
    let mut previous: Option<Vec<(String, Option<String>)>> = None;

    loop {
        let mut calculations = facade.new_calculations();
        if !facade.read(&mut calculations).await {
            error!(host = facade.host(), "changes: CFI read failed");
            return 1;
        }
        let snapshot: Vec<(String, Option<String>)> = calculations
            .iter()
            .map(|(def, field)| (def.preferred_name().to_string(), field.value().map(|v| format!("{:?}", v))))
            .collect();

        if let Some(prev) = &previous {
            for ((name, value), (_, prev_value)) in snapshot.iter().zip(prev.iter()) {
                if value != prev_value {
                    info!(name, ?prev_value, ?value, "calculation changed");
                }
            }
        }
        previous = Some(snapshot);
        tokio::time::sleep(Duration::from_secs(5)).await;
    }
}

async fn run_discover() -> i32 {
    match luxtronik::discover::probe().await {
        Some((ip, Some(port))) => {
            println!("{}", json!({ "ip": ip, "port": port }));
            0
        }
        Some((ip, None)) => {
            println!("{}", json!({ "ip": ip, "port": serde_json::Value::Null }));
            0
        }
        None => {
            error!("discovery timed out with no responder");
            1
        }
    }
}
