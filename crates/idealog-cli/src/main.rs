// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use idealog_app::AppState;
use idealog_db::Store;
use idealog_llm::Client;
use log::{error, info, warn};
use runtime::DbRuntime;
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    match options.mode {
        Mode::Help => {
            print_help();
            return Ok(());
        }
        Mode::PrintConfigPath => {
            println!("{}", options.config_path.display());
            return Ok(());
        }
        Mode::PrintExampleConfig => {
            print!("{}", Config::example_config(&options.config_path));
            return Ok(());
        }
        Mode::PrintDbPath | Mode::Check | Mode::Launch => {}
    }

    let dotenv_path = match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(error) if error.not_found() => None,
        Err(error) => return Err(error).context("load .env file from the working directory"),
    };

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `idealog --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let db_path = if options.demo {
        PathBuf::from(":memory:")
    } else {
        config.db_path()?
    };
    if options.mode == Mode::PrintDbPath {
        println!("{}", db_path.display());
        return Ok(());
    }

    if config.logging_enabled() {
        let log_dir = config.log_dir()?;
        logging::init_logging(config.logging_level(), &log_dir).with_context(|| {
            format!(
                "start logging in {}; set [logging].dir or disable with [logging].enabled = false",
                log_dir.display()
            )
        })?;
    }
    if let Some(path) = &dotenv_path {
        info!("event=dotenv status=ok path={}", path.display());
    }

    let result = launch(&options, &config, &db_path);
    if let Err(error) = &result {
        error!("event=session_end status=error error={error:#}");
    }
    logging::flush_logging();
    result
}

fn launch(options: &CliOptions, config: &Config, db_path: &Path) -> Result<()> {
    let store = Store::open(db_path).with_context(|| {
        format!(
            "open database {}; if this path is wrong, set [storage].db_path or IDEALOG_DB_PATH",
            db_path.display()
        )
    })?;
    store
        .ensure_schema()
        .with_context(|| format!("prepare idea table in {}", db_path.display()))?;
    if options.demo {
        let seeded = store.seed_demo_ideas()?;
        info!("event=demo_seed status=ok rows={seeded}");
    }

    let api_key_env = config.llm_api_key_env();
    let llm_client = Client::new(
        config.llm_base_url(),
        config.llm_model(),
        config.llm_timeout()?,
    )
    .with_context(|| {
        format!(
            "invalid [llm] config in {}; fix base_url/model/timeout values",
            options.config_path.display()
        )
    })?
    .with_api_key(idealog_llm::api_key_from_env(api_key_env), api_key_env)
    .with_extra_context(config.llm_extra_context().map(str::to_owned));

    if !llm_client.has_api_key() {
        warn!("event=api_key status=missing env={}", llm_client.api_key_env());
    }
    if options.mode == Mode::Check {
        info!("event=check status=ok db={}", db_path.display());
        return Ok(());
    }

    info!(
        "event=session_start status=ok db={} model={} timeout={:?}",
        db_path.display(),
        llm_client.model(),
        llm_client.timeout()
    );
    let mut state = AppState::default();
    let mut runtime = DbRuntime::new(&store, llm_client);
    idealog_tui::run_app(&mut state, &mut runtime)?;
    info!("event=session_end status=ok");
    Ok(())
}

/// What a single invocation does. Only one may be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Launch,
    Check,
    PrintConfigPath,
    PrintDbPath,
    PrintExampleConfig,
    Help,
}

impl Mode {
    const fn flag(self) -> &'static str {
        match self {
            Self::Launch => "(none)",
            Self::Check => "--check",
            Self::PrintConfigPath => "--print-config-path",
            Self::PrintDbPath => "--print-path",
            Self::PrintExampleConfig => "--print-example-config",
            Self::Help => "--help",
        }
    }

    fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "--check" => Some(Self::Check),
            "--print-config-path" => Some(Self::PrintConfigPath),
            "--print-path" => Some(Self::PrintDbPath),
            "--print-example-config" => Some(Self::PrintExampleConfig),
            "--help" | "-h" => Some(Self::Help),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    mode: Mode,
    demo: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut config_path = default_config_path;
    let mut mode = Mode::Launch;
    let mut demo = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let arg = arg.as_ref();
        if let Some(path) = arg.strip_prefix("--config=") {
            config_path = config_path_value(path)?;
            continue;
        }
        if arg == "--config" {
            let path = args.next().ok_or_else(|| anyhow!("--config requires a file path"))?;
            config_path = config_path_value(path.as_ref())?;
            continue;
        }
        if arg == "--demo" {
            demo = true;
            continue;
        }

        let requested = Mode::from_flag(arg).ok_or_else(|| {
            anyhow!("unknown argument {arg:?}; run with --help to see supported options")
        })?;
        if requested == Mode::Help {
            mode = Mode::Help;
        } else if mode == Mode::Launch || mode == requested {
            mode = requested;
        } else if mode != Mode::Help {
            bail!(
                "{} cannot be combined with {}",
                requested.flag(),
                mode.flag()
            );
        }
    }

    Ok(CliOptions {
        config_path,
        mode,
        demo,
    })
}

fn config_path_value(raw: &str) -> Result<PathBuf> {
    if raw.trim().is_empty() {
        bail!("--config requires a file path");
    }
    Ok(PathBuf::from(raw))
}

fn print_help() {
    println!("idealog: a terminal idea journal with AI suggestions");
    println!();
    println!("usage: idealog [--config <path>] [--demo] [MODE]");
    println!();
    println!("options:");
    println!("  --config <path>          Read settings from <path> (also --config=<path>)");
    println!("  --demo                   Use an in-memory database seeded with sample ideas");
    println!();
    println!("modes (at most one; default launches the journal):");
    println!("  --check                  Validate config, database, and AI client setup");
    println!("  --print-config-path      Print the resolved config path");
    println!("  --print-path             Print the resolved database path");
    println!("  --print-example-config   Print a config template");
    println!("  -h, --help               Show this help");
}
