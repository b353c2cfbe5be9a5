//! ロギングシステム
//!
//! `log` ファサードのバックエンド。端末はTUIが占有するため、
//! ログは JSON Lines 形式でファイルへ追記する。

use crate::options::{ensure_parent_dir, RunOptions};
use log::{LevelFilter, Log, Metadata, Record};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// 1行分のログレコード
#[derive(Debug, Serialize)]
struct LogLine<'a> {
    ts: u128,
    level: &'a str,
    target: &'a str,
    message: String,
}

/// ファイルへ JSON Lines を書き出すロガー
pub struct DebugLogger {
    path: PathBuf,
    level: LevelFilter,
    file: Mutex<std::fs::File>,
}

impl DebugLogger {
    pub fn new(path: PathBuf, level: LevelFilter) -> io::Result<Self> {
        ensure_parent_dir(&path)?;
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            level,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format_record(record: &Record<'_>) -> serde_json::Result<String> {
        let line = LogLine {
            ts: timestamp_ms(),
            level: record.level().as_str(),
            target: record.target(),
            message: record.args().to_string(),
        };
        serde_json::to_string(&line)
    }
}

impl Log for DebugLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let Ok(line) = Self::format_record(record) else {
            return;
        };
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{line}");
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// オプションに従ってグローバルロガーを設定
///
/// ログ出力先が指定されていない場合は何もしない（`log` マクロは無出力になる）。
pub fn init(options: &RunOptions) -> io::Result<Option<PathBuf>> {
    let Some(path) = options.debug_log.clone() else {
        return Ok(None);
    };

    let logger = DebugLogger::new(path.clone(), options.log_level)?;
    log::set_boxed_logger(Box::new(logger))
        .map_err(|err| io::Error::new(io::ErrorKind::AlreadyExists, err.to_string()))?;
    log::set_max_level(options.log_level);
    Ok(Some(path))
}

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|dur| dur.as_millis())
        .unwrap_or_default()
}
