// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! File logging. The terminal belongs to the UI, so every record goes to a
//! rotating file under the log directory.

use anyhow::{Context, Result, anyhow, bail};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const LOG_FILE_BASENAME: &str = "idealog";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGER: OnceLock<LoggerHandle> = OnceLock::new();

/// Starts the file logger once per process. Later calls are no-ops.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<()> {
    if LOGGER.get().is_some() {
        return Ok(());
    }

    let level = normalize_level(level)?;
    fs::create_dir_all(log_dir)
        .with_context(|| format!("create log directory {}", log_dir.display()))?;

    let handle = Logger::try_with_str(level)
        .with_context(|| format!("invalid log level {level:?}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .with_context(|| format!("start logger in {}", log_dir.display()))?;

    if LOGGER.set(handle).is_err() {
        return Ok(());
    }

    info!(
        "event=app_start status=ok version={} level={level} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        log_dir.display()
    );
    Ok(())
}

/// Writes out buffered records. Safe to call when logging never started.
pub fn flush_logging() {
    if let Some(handle) = LOGGER.get() {
        handle.flush();
    }
}

pub fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => bail!("unsupported log level {other:?}; expected trace|debug|info|warn|error|off"),
    }
}

pub fn default_log_dir() -> Result<PathBuf> {
    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set [logging].dir to a writable directory")
    })?;
    Ok(data_root.join(idealog_db::APP_NAME).join("logs"))
}
