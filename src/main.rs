//! filmpack CLI
//!
//! コンデンサ品番一覧のスプレッドシートを、ビューア埋め込み用のデータスクリプトに変換する。

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use filmpack::logging::{init_logging, LogConfig, LogFormat};
use filmpack::{ColumnProfile, FilmPackError, PackerBuilder, PartNumberPolicy};

#[derive(Parser)]
#[command(
    name = "filmpack",
    version,
    about = "Pack a capacitor part spreadsheet into a compact embeddable data script",
    long_about = "Reads the first worksheet of a spreadsheet, forward-fills merged-cell columns,\n\
                  cleans numeric and dimension columns, drops rows without a part number and\n\
                  writes `const packedData = {\"h\":[...],\"d\":[[...],...]};` to the output file."
)]
struct Cli {
    /// Spreadsheet to read (xlsx, xlsm, xlsb, xls or ods).
    #[arg(value_name = "INPUT", default_value = "Film All Data PQ.xlsx")]
    input: PathBuf,

    /// Script file to generate.
    #[arg(value_name = "OUTPUT", default_value = "film_data.js")]
    output: PathBuf,

    /// Column profile (TOML) overriding the built-in header labels.
    #[arg(long, value_name = "PATH")]
    profile: Option<PathBuf>,

    /// Name of the generated JavaScript constant.
    #[arg(long = "const-name", value_name = "IDENT", default_value = "packedData")]
    const_name: String,

    /// Keep every row when no part number column exists instead of failing.
    #[arg(long = "keep-unnumbered")]
    keep_unnumbered: bool,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "plain")]
    log_format: LogFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Plain,
    Compact,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let format = match cli.log_format {
        LogFormatArg::Plain => LogFormat::Plain,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    init_logging(
        &LogConfig::from_verbosity(cli.verbose, cli.quiet)
            .with_format(format)
            .with_ansi(io::stdout().is_terminal()),
    );

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), FilmPackError> {
    let profile = match &cli.profile {
        Some(path) => ColumnProfile::load(path)?,
        None => ColumnProfile::default(),
    };

    let policy = if cli.keep_unnumbered {
        PartNumberPolicy::KeepAllRows
    } else {
        PartNumberPolicy::FailFast
    };

    let packer = PackerBuilder::new()
        .with_profile(profile)
        .with_part_number_policy(policy)
        .with_constant_name(cli.const_name.as_str())
        .build()?;

    packer.pack_file(&cli.input, &cli.output)?;
    Ok(())
}
