//! Builder Module
//!
//! Fluent Builder APIを提供し、`Packer`インスタンスを段階的に構築する。
//! `Packer`は読み込み → 前方補完 → 数値クリーニング → 行の選別と正規化 → 出力の
//! 一連の処理を1回のパスで実行します。

use std::fs::File;
use std::io::{BufWriter, Read, Seek, Write};
use std::path::Path;

use tracing::{debug, info, trace};

use crate::api::PartNumberPolicy;
use crate::error::FilmPackError;
use crate::output::{is_valid_identifier, ScriptWriter, DEFAULT_CONSTANT_NAME};
use crate::parser::WorkbookReader;
use crate::profile::ColumnProfile;
use crate::security::SecurityConfig;
use crate::transform::{clean_pass, fill_pass, normalize_cell};
use crate::types::{PackSummary, PackedData, RawTable};

/// パック処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct PackConfig {
    /// 列プロファイル
    pub profile: ColumnProfile,

    /// 品番列が見つからない場合の処理方針
    pub part_number_policy: PartNumberPolicy,

    /// 出力する定数名
    pub constant_name: String,

    /// セキュリティ制限
    pub security: SecurityConfig,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            profile: ColumnProfile::default(),
            part_number_policy: PartNumberPolicy::default(),
            constant_name: DEFAULT_CONSTANT_NAME.to_string(),
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use filmpack::{PackerBuilder, PartNumberPolicy};
///
/// # fn main() -> Result<(), filmpack::FilmPackError> {
/// let packer = PackerBuilder::new()
///     .with_part_number_policy(PartNumberPolicy::KeepAllRows)
///     .with_constant_name("filmData")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct PackerBuilder {
    config: PackConfig,
}

impl PackerBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 列プロファイル: `ColumnProfile::default()`（パナソニックのフィルムコンデンサ表）
    /// - 品番列がない場合: エラー（`PartNumberPolicy::FailFast`）
    /// - 定数名: `packedData`
    /// - 入力サイズ上限: 2GB
    pub fn new() -> Self {
        Self::default()
    }

    /// 列プロファイルを指定する
    pub fn with_profile(mut self, profile: ColumnProfile) -> Self {
        self.config.profile = profile;
        self
    }

    /// 品番列が見つからない場合の処理方針を指定する
    pub fn with_part_number_policy(mut self, policy: PartNumberPolicy) -> Self {
        self.config.part_number_policy = policy;
        self
    }

    /// 出力スクリプトの定数名を指定する
    ///
    /// JavaScriptの識別子として有効な名前でなければ`build()`がエラーを返します。
    pub fn with_constant_name(mut self, name: impl Into<String>) -> Self {
        self.config.constant_name = name.into();
        self
    }

    /// 入力ファイルサイズの上限（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`Packer`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `FilmPackError::Config(String)`: 設定の検証に失敗した場合
    ///   * 定数名がJavaScriptの識別子として無効
    ///   * 列プロファイルの不整合（`ColumnProfile::validate`参照）
    pub fn build(self) -> Result<Packer, FilmPackError> {
        // 1. 定数名の検証
        if !is_valid_identifier(&self.config.constant_name) {
            return Err(FilmPackError::Config(format!(
                "Invalid constant name: '{}'",
                self.config.constant_name
            )));
        }

        // 2. 列プロファイルの検証
        self.config.profile.validate()?;

        Ok(Packer::new(self.config))
    }
}

/// パック処理のファサード
///
/// # 使用例
///
/// ```rust,no_run
/// use filmpack::PackerBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), filmpack::FilmPackError> {
/// let packer = PackerBuilder::new().build()?;
/// let input = File::open("Film All Data PQ.xlsx")?;
/// let script = packer.convert_to_string(input)?;
/// println!("{}", script);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Packer {
    config: PackConfig,
    writer: ScriptWriter,
}

impl Packer {
    pub(crate) fn new(config: PackConfig) -> Self {
        Self {
            writer: ScriptWriter::new(config.constant_name.clone()),
            config,
        }
    }

    /// 使用中の列プロファイル
    pub fn profile(&self) -> &ColumnProfile {
        &self.config.profile
    }

    /// スプレッドシートの最初のワークシートを表として読み込む
    pub fn read_table<R: Read>(&self, input: R) -> Result<RawTable, FilmPackError> {
        let mut reader = WorkbookReader::open(input, &self.config.security)?;
        reader.read_first_sheet()
    }

    /// 表をパックする
    ///
    /// # 処理フロー
    ///
    /// 1. ヘッダー列の取得
    /// 2. 前方補完（結合セル列）
    /// 3. 数値クリーニング（寸法列は100超を10で割る）
    /// 4. 品番列の特定
    /// 5. 品番が空の行を除外し、残りの行のセルを正規化
    pub fn pack(&self, table: RawTable) -> Result<PackedData, FilmPackError> {
        self.pack_with_summary(table).map(|(data, _)| data)
    }

    /// 表をパックし、集計結果も返す
    pub fn pack_with_summary(
        &self,
        mut table: RawTable,
    ) -> Result<(PackedData, PackSummary), FilmPackError> {
        let profile = &self.config.profile;

        // 1. ヘッダー列
        info!("Mapped {} columns.", table.column_count());

        // 2. 前方補完
        let filled = fill_pass(&mut table, &profile.fill_labels());
        debug!(filled, "column fill complete");

        // 3. 数値クリーニング
        let fallback_cells = clean_pass(&mut table, &profile.numeric_labels());
        debug!(fallback_cells, "numeric cleaning complete");

        info!("Processing {} rows...", table.row_count());

        // 4. 品番列の特定
        let part_number = profile.part_number.resolve(table.headers());
        match part_number {
            Some(index) => debug!(
                column = %table.headers()[index].escape_debug(),
                "resolved part number column"
            ),
            None if table.row_count() == 0 => {}
            None => match self.config.part_number_policy {
                PartNumberPolicy::FailFast => {
                    return Err(FilmPackError::MissingPartNumberColumn {
                        exact: profile.part_number.exact.clone(),
                        contains: profile.part_number.contains.clone(),
                    });
                }
                PartNumberPolicy::KeepAllRows => {
                    info!("No part number column found; keeping every row.");
                }
            },
        }

        // 5. 行の選別と正規化
        let (headers, rows) = table.into_parts();
        let rows_read = rows.len();

        let mut packed = Vec::with_capacity(rows_read);
        for (row_idx, row) in rows.iter().enumerate() {
            if let Some(index) = part_number {
                if row[index].is_empty() {
                    trace!(row = row_idx, "skipping row without part number");
                    continue;
                }
            }
            packed.push(row.iter().map(normalize_cell).collect());
        }

        let summary = PackSummary {
            columns: headers.len(),
            rows_read,
            records: packed.len(),
            rows_skipped: rows_read - packed.len(),
            fallback_cells,
        };

        Ok((
            PackedData {
                h: headers,
                d: packed,
            },
            summary,
        ))
    }

    /// スプレッドシートを読み込み、パック済みスクリプトをライターへ出力する
    ///
    /// 出力はすべての行を処理し終えてから一度に書き込みます。
    pub fn convert<R: Read + Seek, W: Write>(
        &self,
        input: R,
        mut output: W,
    ) -> Result<PackSummary, FilmPackError> {
        let table = self.read_table(input)?;
        let (data, summary) = self.pack_with_summary(table)?;
        self.writer.write(&data, &mut output)?;
        Ok(summary)
    }

    /// スプレッドシートを読み込み、パック済みスクリプトを文字列として返す
    pub fn convert_to_string<R: Read + Seek>(&self, input: R) -> Result<String, FilmPackError> {
        let table = self.read_table(input)?;
        let data = self.pack(table)?;
        self.writer.render(&data)
    }

    /// 入力ファイルを読み込み、出力ファイルを生成する
    ///
    /// 出力ファイルはスクリプト全体を生成した後に作成し、書き込み後すぐに閉じます。
    /// 途中でエラーが発生した場合、出力ファイルは作成されません。
    pub fn pack_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<PackSummary, FilmPackError> {
        let input = input.as_ref();
        let output = output.as_ref();

        info!("Reading {}...", input.display());
        let table = self.read_table(File::open(input)?)?;

        let (data, summary) = self.pack_with_summary(table)?;

        info!(
            "Generating {} with {} columns...",
            output.display(),
            summary.columns
        );
        let script = self.writer.render(&data)?;
        {
            let mut writer = BufWriter::new(File::create(output)?);
            writer.write_all(script.as_bytes())?;
            writer.flush()?;
        }

        info!("Done! Processed {} records.", summary.records);
        Ok(summary)
    }
}
