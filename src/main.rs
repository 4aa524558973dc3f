// src/main.rs

//! `xr-platform`: prints what the build target offers an OpenXR runtime and
//! manages the system's active runtime registration.

use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use xr_platform::capabilities::current_feature_defines;
use xr_platform::runtime_manifest;
use xr_platform::{Config, PlatformDescriptor, RuntimeStatus};

const USAGE: &str = "usage: xr-platform [info|defines|status|activate] [--config PATH]";
const DEFAULT_CONFIG_FILE: &str = "xr-platform.json";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Info,
    Defines,
    Status,
    Activate,
}

#[derive(Debug)]
struct Args {
    command: Command,
    config_path: PathBuf,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut command = None;
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_FILE);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = args
                    .next()
                    .map(PathBuf::from)
                    .context("--config needs a path")?;
            }
            name if command.is_none() => {
                command = Some(match name {
                    "info" => Command::Info,
                    "defines" => Command::Defines,
                    "status" => Command::Status,
                    "activate" => Command::Activate,
                    other => bail!("unknown command '{other}'\n{USAGE}"),
                });
            }
            other => bail!("unexpected argument '{other}'\n{USAGE}"),
        }
    }

    Ok(Args {
        command: command.unwrap_or(Command::Info),
        config_path,
    })
}

fn main() -> Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    let descriptor = PlatformDescriptor::current();
    if !descriptor.is_supported() {
        warn!("Build target has no known OpenXR integration");
    }

    match args.command {
        Command::Info => {
            let json = serde_json::to_string_pretty(descriptor)
                .context("Failed to serialize platform descriptor")?;
            println!("{json}");
        }
        Command::Defines => {
            for define in current_feature_defines() {
                println!("{define}");
            }
        }
        Command::Status => {
            let config = Config::load_or_default(&args.config_path)?;
            let active = runtime_manifest::load_active_manifest()?;
            let status = runtime_manifest::classify(active.as_ref(), &config)?;
            match &active {
                Some(active) => println!("active runtime: {}", active.manifest.runtime_name()),
                None => println!("active runtime: none"),
            }
            println!(
                "{}",
                match status {
                    RuntimeStatus::Ok => "status: ok",
                    RuntimeStatus::DifferentVersion => "status: different version",
                    RuntimeStatus::DifferentRuntime => "status: different runtime",
                    RuntimeStatus::NotInstalled => "status: not installed",
                }
            );
        }
        Command::Activate => {
            let config = Config::load_or_default(&args.config_path)?;
            let path = runtime_manifest::activate(&config)?;
            info!("Active runtime manifest is now {}", path.display());
        }
    }

    Ok(())
}
