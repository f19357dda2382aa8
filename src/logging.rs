//! Logging Module
//!
//! `tracing`と`tracing-subscriber`によるログ出力の初期化を提供するモジュール。
//!
//! # ログレベル
//!
//! - `error`: 実行を中断するエラー
//! - `warn`: 処理は継続できる警告
//! - `info`: パイプラインの各段階の進捗（読み込み・列数・行数・出力件数）
//! - `debug`: 列ごとの補完数・数値化できなかったセル数・品番列の特定結果
//! - `trace`: 行単位の情報（除外した行など）

use std::io;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// ログの出力形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// メッセージのみを出力する形式（進捗表示向け）
    #[default]
    Plain,
    /// レベルとフィールドを含む1行形式
    Compact,
    /// 機械処理向けのJSON形式
    Json,
}

/// ログ出力の設定
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 出力するログレベルの上限
    pub level: LevelFilter,
    /// 出力形式
    pub format: LogFormat,
    /// タイムスタンプを付けるか
    pub with_timestamps: bool,
    /// ANSIカラーを使用するか
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            format: LogFormat::default(),
            with_timestamps: false,
            with_ansi: false,
        }
    }
}

impl LogConfig {
    /// `-v`/`-q`の指定回数から設定を生成する
    ///
    /// - `-q`: errorのみ
    /// - 指定なし: info
    /// - `-v`: debug
    /// - `-vv`以上: trace
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        let level = if quiet {
            LevelFilter::ERROR
        } else {
            match verbose {
                0 => LevelFilter::INFO,
                1 => LevelFilter::DEBUG,
                _ => LevelFilter::TRACE,
            }
        };
        Self {
            level,
            ..Default::default()
        }
    }

    /// 出力形式を指定する
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// ANSIカラーの使用を指定する
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// 標準出力へのログ出力を初期化する
///
/// アプリケーション起動時に1回だけ呼び出します。
pub fn init_logging(config: &LogConfig) {
    init_logging_with_writer(config, io::stdout);
}

/// 任意のライターへのログ出力を初期化する
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config.level);

    match config.format {
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(writer).with_target(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(false);
            if config.with_timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer)
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.without_time())
                    .init();
            }
        }
        LogFormat::Plain => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(false)
                .with_level(false)
                .without_time();
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .init();
        }
    }
}

/// `RUST_LOG`が設定されていればそれを優先し、なければ指定レベルを使う
fn build_env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}
