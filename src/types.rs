//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use serde::{Deserialize, Serialize};

use crate::error::FilmPackError;

/// スプレッドシートから読み込んだ生のセル値
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    /// 空セル（欠損値）
    Empty,

    /// 数値（整数セルもf64として保持）
    Number(f64),

    /// 文字列（前後の空白は保持したまま）
    Text(String),
}

impl RawCell {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, RawCell::Empty)
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        RawCell::Number(value)
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        RawCell::Text(value.to_string())
    }
}

impl From<String> for RawCell {
    fn from(value: String) -> Self {
        RawCell::Text(value)
    }
}

/// ヘッダー列と行データからなる表
///
/// すべての行はヘッダーと同じ長さを持ちます。列の補完・数値クリーニングは
/// 列単位でセルを書き換えるだけで、行の増減は行いません。
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    /// ヘッダーと行から表を構築する
    ///
    /// ヘッダーより短い行は`RawCell::Empty`で埋めます。
    ///
    /// # 発生し得るエラー
    ///
    /// * `FilmPackError::Config` - ヘッダーより長い行が含まれる場合
    pub fn new(headers: Vec<String>, rows: Vec<Vec<RawCell>>) -> Result<Self, FilmPackError> {
        let width = headers.len();
        let mut padded = Vec::with_capacity(rows.len());

        for (row_idx, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(FilmPackError::Config(format!(
                    "Row {} has {} cells but the header has {} columns",
                    row_idx,
                    row.len(),
                    width
                )));
            }
            row.resize(width, RawCell::Empty);
            padded.push(row);
        }

        Ok(Self {
            headers,
            rows: padded,
        })
    }

    /// ヘッダー列
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// データ行（ヘッダー行を含まない）
    pub fn rows(&self) -> &[Vec<RawCell>] {
        &self.rows
    }

    /// 列数
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// データ行数
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 完全一致するヘッダーの列インデックスを返す
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// 指定した列のセルを上から順に返す
    pub fn column(&self, index: usize) -> impl Iterator<Item = &RawCell> + '_ {
        self.rows.iter().map(move |row| &row[index])
    }

    /// 指定した列のセルへの可変参照を上から順に返す
    pub(crate) fn column_mut(&mut self, index: usize) -> impl Iterator<Item = &mut RawCell> + '_ {
        self.rows.iter_mut().map(move |row| &mut row[index])
    }

    /// ヘッダーと行に分解する
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<RawCell>>) {
        (self.headers, self.rows)
    }
}

/// 正規化済みのスカラー値
///
/// JSONへは型タグなしでシリアライズされます（`null`、整数、浮動小数点数、文字列）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

/// 1行分の正規化済みセル（ヘッダーと同じ順序）
pub type PackedRow = Vec<Scalar>;

/// 最終的な出力データ
///
/// `h`はヘッダー列、`d`は品番を持つ行の配列です。
/// オブジェクトの配列ではなく配列の配列にすることで、出力サイズを抑えています。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedData {
    /// ヘッダー列
    pub h: Vec<String>,

    /// パック済みの行
    pub d: Vec<PackedRow>,
}

impl PackedData {
    /// すべての行がヘッダーと同じ長さかを判定
    pub fn is_rectangular(&self) -> bool {
        self.d.iter().all(|row| row.len() == self.h.len())
    }
}

/// パック処理の集計結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackSummary {
    /// 列数
    pub columns: usize,

    /// 読み込んだデータ行数
    pub rows_read: usize,

    /// 出力した行数
    pub records: usize,

    /// 品番が空のため除外した行数
    pub rows_skipped: usize,

    /// 数値に変換できず元の値のまま残したセル数
    pub fallback_cells: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_raw_table_pads_short_rows() {
        let table = RawTable::new(
            headers(&["A", "B", "C"]),
            vec![vec![RawCell::from("x")], vec![]],
        )
        .unwrap();

        assert_eq!(table.row_count(), 2);
        assert!(table.rows().iter().all(|row| row.len() == 3));
        assert_eq!(table.rows()[0][1], RawCell::Empty);
    }

    #[test]
    fn test_raw_table_rejects_long_rows() {
        let result = RawTable::new(
            headers(&["A"]),
            vec![vec![RawCell::from(1.0), RawCell::from(2.0)]],
        );

        match result {
            Err(FilmPackError::Config(msg)) => assert!(msg.contains("Row 0")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_column_lookup_is_exact() {
        let table = RawTable::new(headers(&["Height\n(mm)", "Height"]), vec![]).unwrap();
        assert_eq!(table.column_index("Height"), Some(1));
        assert_eq!(table.column_index("Height\n(mm)"), Some(0));
        assert_eq!(table.column_index("height"), None);
    }

    #[test]
    fn test_column_iteration() {
        let table = RawTable::new(
            headers(&["A", "B"]),
            vec![
                vec![RawCell::from(1.0), RawCell::from("a")],
                vec![RawCell::Empty, RawCell::from("b")],
            ],
        )
        .unwrap();

        let column: Vec<&RawCell> = table.column(1).collect();
        assert_eq!(column, vec![&RawCell::from("a"), &RawCell::from("b")]);
    }

    #[test]
    fn test_scalar_serialization_is_untagged() {
        let row: PackedRow = vec![
            Scalar::Null,
            Scalar::Int(5),
            Scalar::Float(31.5),
            Scalar::Text("ECW".to_string()),
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"[null,5,31.5,"ECW"]"#);
    }

    #[test]
    fn test_scalar_deserialization_keeps_kinds() {
        let row: PackedRow = serde_json::from_str(r#"[null,5,31.5,"ECW"]"#).unwrap();
        assert_eq!(row[0], Scalar::Null);
        assert_eq!(row[1], Scalar::Int(5));
        assert_eq!(row[2], Scalar::Float(31.5));
        assert_eq!(row[3], Scalar::Text("ECW".to_string()));
    }

    #[test]
    fn test_packed_data_is_rectangular() {
        let mut data = PackedData {
            h: headers(&["A", "B"]),
            d: vec![vec![Scalar::Null, Scalar::Int(1)]],
        };
        assert!(data.is_rectangular());

        data.d.push(vec![Scalar::Null]);
        assert!(!data.is_rectangular());
    }
}
