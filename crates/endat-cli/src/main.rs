use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tabwriter::TabWriter;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use endat_core::{config, paths, Config, PostgisConfig};

mod cli;

use cli::{Cli, Commands, OutputFormat};

const USER_CONFIG_TEMPLATE: &str = "\
# endat user configuration. Values set here override the shipped table.

[root_paths]
# Where downloaded data is stored:
# local_root = /srv/energy

[postGIS]
# host = localhost
# username = postgres
# database = energy
# port = 5432
";

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    if let Err(err) = run(&cli) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Sections => {
            let cfg = Config::load()?;
            for name in cfg.section_names() {
                println!("{name}");
            }
            Ok(())
        }
        Commands::Get { section, key } => {
            let cfg = Config::load()?;
            let value = cfg
                .get(section, key)
                .with_context(|| format!("looking up [{section}] {key}"))?;
            println!("{value}");
            Ok(())
        }
        Commands::Show { section, format } => show(section.as_deref(), *format),
        Commands::Paths { format } => show_paths(*format),
        Commands::Check => check(),
        Commands::Init { out } => init(out.clone()),
    }
}

fn show(section: Option<&str>, format: OutputFormat) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let selected: Vec<_> = cfg
        .sections()
        .filter(|s| section.is_none_or(|name| s.name == name))
        .collect();
    if selected.is_empty() {
        if let Some(name) = section {
            anyhow::bail!("no section [{name}] in the configuration");
        }
    }
    match format {
        OutputFormat::Plain => {
            for sec in selected {
                println!("[{}]", sec.name);
                for (key, value) in sec.iter() {
                    println!("{key} = {value}");
                }
                println!();
            }
        }
        OutputFormat::Json => {
            let mut root = serde_json::Map::new();
            for sec in selected {
                let mut entries = serde_json::Map::new();
                for (key, value) in sec.iter() {
                    entries.insert(key.to_string(), serde_json::Value::from(value));
                }
                root.insert(sec.name.clone(), serde_json::Value::Object(entries));
            }
            serde_json::to_writer_pretty(io::stdout(), &serde_json::Value::Object(root))?;
            println!();
        }
    }
    Ok(())
}

fn show_paths(format: OutputFormat) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    match format {
        OutputFormat::Plain => {
            let mut writer = TabWriter::new(io::stdout());
            writeln!(writer, "NAME\tKIND\tPATH")?;
            for (section, kind) in [
                (paths::PATHS_SECTION, "path"),
                (paths::PATHS_PATTERN_SECTION, "pattern"),
            ] {
                let Ok(map) = cfg.section_map(section) else {
                    continue;
                };
                for (name, value) in map {
                    writeln!(writer, "{name}\t{kind}\t{value}")?;
                }
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            let mut root = serde_json::Map::new();
            for section in [paths::PATHS_SECTION, paths::PATHS_PATTERN_SECTION] {
                let Ok(map) = cfg.section_map(section) else {
                    continue;
                };
                let entries: serde_json::Map<_, _> = map
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect();
                root.insert(section.to_string(), serde_json::Value::Object(entries));
            }
            serde_json::to_writer_pretty(io::stdout(), &serde_json::Value::Object(root))?;
            println!();
        }
    }
    Ok(())
}

fn check() -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let mut violations = paths::verify_path_names(&cfg)?;
    if let Err(err) = PostgisConfig::from_config(&cfg) {
        violations.push(format!("postGIS: {err}"));
    }
    if violations.is_empty() {
        println!("Configuration OK.");
        return Ok(());
    }
    for violation in &violations {
        println!("violation: {violation}");
    }
    anyhow::bail!("{} configuration violation(s)", violations.len())
}

fn init(out: Option<PathBuf>) -> anyhow::Result<()> {
    let target = match out {
        Some(path) => path,
        None => config::user_config_dir()
            .context("unable to determine the endat configuration directory")?
            .join("endat.ini"),
    };
    if target.exists() {
        anyhow::bail!("{} already exists; not overwriting", target.display());
    }
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, USER_CONFIG_TEMPLATE)?;
    info!("Wrote user configuration template");
    println!("Wrote {}", target.display());
    Ok(())
}
