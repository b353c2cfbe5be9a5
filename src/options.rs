//! 起動オプション
//!
//! コマンドライン引数と環境変数から実行時設定を組み立てる。設定は永続化しない。

use log::LevelFilter;
use std::path::{Path, PathBuf};

/// デバッグログを有効化する環境変数
pub const DEBUG_ENV: &str = "NOTEPAD_DEBUG";
/// ログレベルを指定する環境変数
pub const LOG_LEVEL_ENV: &str = "NOTEPAD_LOG_LEVEL";

/// 実行時オプション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// デバッグログ出力先（`None` ならログ無効）
    pub debug_log: Option<PathBuf>,
    /// ログレベル
    pub log_level: LevelFilter,
    /// 解釈できなかった引数（ロガー初期化前なので呼び出し側が報告する）
    pub unknown_args: Vec<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            debug_log: None,
            log_level: LevelFilter::Info,
            unknown_args: Vec::new(),
        }
    }
}

impl RunOptions {
    /// プロセスの引数と環境変数から構築
    pub fn from_env() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::parse(&args, |key| std::env::var(key).ok())
    }

    /// 引数と環境変数の参照関数から構築
    ///
    /// `--debug-log [PATH]` はパス省略時に既定のログパスを使う。
    /// 環境変数 `NOTEPAD_DEBUG` が設定されていれば引数がなくてもログを有効にする。
    pub fn parse<F>(args: &[String], env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = RunOptions::default();

        if env(DEBUG_ENV).is_some_and(|value| !value.is_empty() && value != "0") {
            options.debug_log = default_log_path();
        }

        if let Some(level) = env(LOG_LEVEL_ENV).and_then(|value| value.parse().ok()) {
            options.log_level = level;
        }

        let mut iter = args.iter().peekable();
        while let Some(arg) = iter.next() {
            if arg.as_str() == "--debug-log" {
                let path = iter
                    .peek()
                    .filter(|next| !next.starts_with('-'))
                    .map(|next| PathBuf::from(next.as_str()));
                if path.is_some() {
                    iter.next();
                    options.debug_log = path;
                } else {
                    options.debug_log = default_log_path();
                }
            } else {
                options.unknown_args.push(arg.clone());
            }
        }

        options
    }
}

/// 既定のログファイルパス（`~/.notepad-log/debug.log`）
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".notepad-log").join("debug.log"))
}

/// 親ディレクトリを作成
pub(crate) fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
