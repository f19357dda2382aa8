//! Workbook Reader
//!
//! calamineのラッパーとして、最初のワークシートを`RawTable`として読み込みます。

use calamine::{open_workbook_auto_from_rs, CellErrorType, Data, Range, Reader, Sheets};
use chrono::NaiveDateTime;
use std::io::{Cursor, Read};
use tracing::debug;

use super::header::{dedupe_headers, header_label};
use crate::error::FilmPackError;
use crate::security::SecurityConfig;
use crate::types::{RawCell, RawTable};

/// 欠損値として扱う文字列
const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// ワークブックリーダー
///
/// 入力をすべてメモリに読み込み、形式（xlsx / xlsm / xlsb / xls / ods）を自動判定して開きます。
pub(crate) struct WorkbookReader {
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookReader {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - スプレッドシートを読み込むためのリーダー
    /// * `security` - 入力サイズの上限
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookReader)` - 読み込みに成功した場合
    /// * `Err(FilmPackError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(FilmPackError::Parse)` - スプレッドシートとして解析できない場合
    pub fn open<R: Read>(mut reader: R, security: &SecurityConfig) -> Result<Self, FilmPackError> {
        let mut buffer = Vec::new();
        let bytes_read = reader.read_to_end(&mut buffer)?;
        security.check_input_size(bytes_read)?;

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { workbook })
    }

    /// 最初のワークシートを読み込む
    ///
    /// # 発生し得るエラー
    ///
    /// * `FilmPackError::Config` - ワークシートが1つもない場合
    /// * `FilmPackError::Parse` - ワークシートの解析に失敗した場合
    pub fn read_first_sheet(&mut self) -> Result<RawTable, FilmPackError> {
        let sheet_name = self
            .workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| FilmPackError::Config("Workbook has no worksheet".to_string()))?;

        let range = self.workbook.worksheet_range(&sheet_name)?;
        debug!(sheet = %sheet_name, size = ?range.get_size(), "loaded worksheet");

        table_from_range(&range)
    }
}

/// セル範囲を表に変換する
///
/// 範囲の1行目をヘッダー行、2行目以降をデータ行として扱います。
pub(crate) fn table_from_range(range: &Range<Data>) -> Result<RawTable, FilmPackError> {
    let mut rows = range.rows();

    let Some(header_row) = rows.next() else {
        return RawTable::new(Vec::new(), Vec::new());
    };

    let headers = dedupe_headers(
        header_row
            .iter()
            .enumerate()
            .map(|(index, cell)| header_label(cell, index))
            .collect(),
    );
    let data = rows.map(|row| row.iter().map(cell_value).collect()).collect();

    RawTable::new(headers, data)
}

/// calamineのセル値を`RawCell`に変換
pub(crate) fn cell_value(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Float(f) => RawCell::Number(*f),
        Data::String(s) if s.is_empty() || NA_MARKERS.contains(&s.as_str()) => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Bool(b) => RawCell::Number(if *b { 1.0 } else { 0.0 }),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if !dt.is_duration() => RawCell::Text(format_datetime(&value)),
            _ => RawCell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Error(CellErrorType::NA) => RawCell::Empty,
        Data::Error(e) => RawCell::Text(e.to_string()),
    }
}

/// 日時セルを`YYYY-MM-DD HH:MM:SS`形式の文字列にする
fn format_datetime(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}
