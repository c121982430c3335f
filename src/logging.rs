//! Logging Module
//!
//! `tracing`と`tracing-subscriber`を使用したログ出力の初期化を提供するモジュール。
//!
//! ライブラリ内部では`tracing`のマクロのみを使用し、購読者（subscriber）の
//! 初期化はバイナリ側で一度だけ行います。
//!
//! # ログレベル
//!
//! - `warn`: ヘッダー行が見つからない、未知の列にデータがある
//! - `info`: 抽出件数、出力ファイル
//! - `debug`: 読み込んだ行数、ヘッダー行の位置

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

/// ログ設定
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `RUST_LOG`が未設定の場合に使用するレベル
    pub level: LevelFilter,

    /// `RUST_LOG`環境変数を優先するか
    pub use_env_filter: bool,

    /// ANSIカラーを使用するか
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// 詳細度（`-v`の数から`-q`の数を引いた値）からログ設定を生成する
    ///
    /// - -1以下: error
    /// - 0: warn
    /// - 1: info
    /// - 2: debug
    /// - 3以上: trace
    pub fn from_verbosity(verbosity: i8) -> Self {
        let level = match verbosity {
            i8::MIN..=-1 => LevelFilter::ERROR,
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self {
            level,
            use_env_filter: verbosity == 0,
            ..Self::default()
        }
    }

    /// 実際に使用するフィルターを構築する
    fn filter(&self) -> EnvFilter {
        let fallback = || EnvFilter::new(self.level.to_string());
        if self.use_env_filter {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
        } else {
            fallback()
        }
    }
}

/// ログ出力を初期化する
///
/// ログは標準エラー出力に書き出されます（標準出力は変換結果の案内に使用）。
///
/// # 戻り値
///
/// * `Ok(())` - 初期化に成功した場合
/// * `Err(String)` - すでに別の購読者が設定されている場合
pub fn init_logging(config: &LogConfig) -> Result<(), String> {
    fmt()
        .with_env_filter(config.filter())
        .with_ansi(config.with_ansi)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| e.to_string())
}
