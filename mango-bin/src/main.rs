use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{arg, value_parser, ArgGroup, ArgMatches, Command};
use log::{debug, info};
use uuid::Uuid;

use mango_app_util::compose::compose_engine_config;
use mango_app_util::proxy::Proxy;
use mango_app_util::settings::{LogLevel, Settings};
use mango_app_util::share_link::LinkComponents;
use mango_app_util::store::{ConfigurationStore, FsConfigurationStore, StoredConfiguration};

fn main() -> Result<()> {
    let args = get_args();
    let settings = match args.subcommand() {
        Some(("compile", sub)) => load_settings(sub)?,
        _ => Settings::default(),
    };
    init_log(&args, settings.log.level);
    try_main(&args, settings)
}

fn get_args() -> ArgMatches {
    clap::command!()
        .subcommand_required(true)
        .arg(arg!(-v --verbose "Turn on verbose logging").global(true).required(false))
        .subcommand(
            Command::new("parse")
                .about("Decode a share link and print the configuration record")
                .arg(arg!(<LINK> "The share link to decode")),
        )
        .subcommand(
            Command::new("compile")
                .about("Compile a configuration into the engine configuration file")
                .arg(
                    arg!(--store <DIR> "Directory holding one sub-directory per configuration id")
                        .value_parser(value_parser!(PathBuf))
                        .requires("id")
                        .required(false),
                )
                .arg(
                    arg!(--id <UUID> "Id of the stored configuration to compile")
                        .value_parser(value_parser!(Uuid))
                        .requires("store")
                        .required(false),
                )
                .arg(arg!(--link <LINK> "Compile a share link instead of a stored configuration").required(false))
                .group(ArgGroup::new("source").args(["id", "link"]).required(true))
                .arg(
                    arg!(--settings <FILE> "Path to the TOML settings file. If missing, default settings will be used")
                        .value_parser(value_parser!(PathBuf))
                        .required(false),
                )
                .arg(
                    arg!(--port <PORT> "Port of the local SOCKS inbound, overriding the settings file")
                        .value_parser(value_parser!(u16).range(1..))
                        .required(false),
                )
                .arg(
                    arg!(--output <FILE> "Where to write the engine configuration")
                        .value_parser(value_parser!(PathBuf))
                        .default_value("config.json"),
                ),
        )
        .get_matches()
}

fn load_settings(args: &ArgMatches) -> Result<Settings> {
    let mut settings = match args.get_one::<PathBuf>("settings") {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(port) = args.get_one::<u16>("port") {
        settings.network.inbound_port = *port;
    }
    Ok(settings)
}

fn init_log(args: &ArgMatches, configured: Option<LogLevel>) {
    let is_verbose = args.get_flag("verbose");
    let colors = fern::colors::ColoredLevelConfig::new();
    let default_level;
    #[cfg(debug_assertions)]
    {
        default_level = log::LevelFilter::Debug;
    }
    #[cfg(not(debug_assertions))]
    {
        default_level = log::LevelFilter::Info;
    }
    let level = if is_verbose {
        log::LevelFilter::Debug
    } else {
        configured.map_or(default_level, LogLevel::to_level_filter)
    };

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S%.3f]"),
                record.target(),
                colors.color(record.level()),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .expect("Cannot set up logger");
}

fn try_main(args: &ArgMatches, settings: Settings) -> Result<()> {
    match args.subcommand() {
        Some(("parse", sub)) => {
            let link = sub
                .get_one::<String>("LINK")
                .context("A share link is required")?;
            let proxy = decode_link(link)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&proxy).context("Failed to serialize configuration")?
            );
            Ok(())
        }
        Some(("compile", sub)) => compile(sub, &settings),
        _ => unreachable!("subcommand is required"),
    }
}

fn decode_link(link: &str) -> Result<Proxy> {
    let components = LinkComponents::parse(link).context("Failed to parse share link")?;
    info!(
        r#"Decoding "{}" ({}://{}:{})"#,
        components.descriptive, components.protocol_type, components.host, components.port
    );
    Proxy::from_components(&components).context("Failed to decode share link")
}

fn compile(args: &ArgMatches, settings: &Settings) -> Result<()> {
    let stored = if let Some(link) = args.get_one::<String>("link") {
        StoredConfiguration::Proxy(decode_link(link)?)
    } else {
        let root = args
            .get_one::<PathBuf>("store")
            .context("--store is required with --id")?;
        let id = args
            .get_one::<Uuid>("id")
            .context("--id is required with --store")?;
        let store = FsConfigurationStore::new(root.clone())
            .with_context(|| format!("Failed to open configuration store {}", root.display()))?;
        info!("Loading configuration {} from {}", id, store.root().display());
        store
            .load_configuration(id)
            .with_context(|| format!("Failed to load configuration {id}"))?
    };

    let port = settings.network.inbound_port;
    let config = match stored {
        StoredConfiguration::Proxy(proxy) => compose_engine_config(&proxy, port, settings, settings)
            .context("Failed to compile engine configuration")?,
        StoredConfiguration::Raw(data) => {
            info!("Configuration is a complete engine configuration, copying unchanged");
            data
        }
    };

    let output = args
        .get_one::<PathBuf>("output")
        .context("An output path is required")?;
    write_atomically(output, &config)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        "Wrote engine configuration to {} (inbound port {})",
        output.display(),
        port
    );
    Ok(())
}

fn write_atomically(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    debug!("Writing {} bytes to {}", data.len(), tmp.display());
    if let Err(e) = fs::write(&tmp, data).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}
