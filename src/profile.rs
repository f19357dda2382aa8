//! Column Profile Module
//!
//! 列名の設定（論理フィールド名 → 実際のヘッダー名）を定義するモジュール。
//! 前方補完の対象列・数値クリーニングの対象列・品番列の探し方を、
//! 特定のスプレッドシートのヘッダー表記から切り離して設定データとして保持します。

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FilmPackError;

/// 品番列の探し方
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartNumberRule {
    /// 完全一致で優先するヘッダー名
    pub exact: String,

    /// 完全一致がない場合に部分一致で探す文字列（大文字小文字を区別）
    #[serde(default)]
    pub contains: Vec<String>,
}

impl Default for PartNumberRule {
    fn default() -> Self {
        Self {
            exact: "PartNumber".to_string(),
            contains: vec!["PartNumber".to_string(), "Part Number".to_string()],
        }
    }
}

impl PartNumberRule {
    /// ヘッダー列から品番列のインデックスを特定する
    ///
    /// 完全一致を優先し、なければ部分一致する最初のヘッダーを返します。
    pub fn resolve(&self, headers: &[String]) -> Option<usize> {
        headers.iter().position(|h| *h == self.exact).or_else(|| {
            headers.iter().position(|h| {
                self.contains
                    .iter()
                    .any(|needle| !needle.is_empty() && h.contains(needle.as_str()))
            })
        })
    }
}

/// 列プロファイル
///
/// デフォルトはパナソニックのフィルムコンデンサ一覧表のヘッダー表記です。
/// TOMLファイルから読み込むこともできます（`profiles/panasonic_film.toml`参照）。
///
/// # 使用例
///
/// ```rust
/// use filmpack::ColumnProfile;
///
/// let profile = ColumnProfile::default();
/// assert_eq!(profile.label("height"), Some("Height\n(mm)"));
/// assert!(profile.is_dimension("Height\n(mm)"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// 論理フィールド名 → ヘッダー名
    pub labels: BTreeMap<String, String>,

    /// 前方補完する論理フィールド名（処理順）
    #[serde(default)]
    pub fill: Vec<String>,

    /// 数値クリーニングする論理フィールド名（処理順）
    #[serde(default)]
    pub numeric: Vec<String>,

    /// ヘッダー名にこの文字列を含む列を寸法列（mm）として扱う
    #[serde(default = "default_dimension_marker")]
    pub dimension_marker: String,

    /// 品番列の探し方
    #[serde(default)]
    pub part_number: PartNumberRule,
}

fn default_dimension_marker() -> String {
    "(mm)".to_string()
}

const DEFAULT_LABELS: &[(&str, &str)] = &[
    ("type", "Type"),
    ("rated_voltage", "Rated \nVoltage (V)"),
    ("voltage_type", "Voltage type"),
    ("capacitance", "Capacitance\n(uF)"),
    ("tolerance", "C Tol.\n(%)"),
    ("body_length", "Body length / dia\n(mm)"),
    ("body_width", "Body width\n(mm)"),
    ("height", "Height\n(mm)"),
    ("lead_space", "Lead Space P1\n(mm)"),
    ("temperature_range", "Category Temperature Range \n(°C)"),
    ("dielectric", "Dielectric Material"),
    ("esr", "ESR (mΩ)"),
];

const DEFAULT_FILL: &[&str] = &[
    "type",
    "rated_voltage",
    "voltage_type",
    "capacitance",
    "tolerance",
    "body_length",
    "body_width",
    "height",
    "lead_space",
    "temperature_range",
    "dielectric",
];

const DEFAULT_NUMERIC: &[&str] = &[
    "rated_voltage",
    "capacitance",
    "body_length",
    "body_width",
    "height",
    "lead_space",
    "esr",
];

impl Default for ColumnProfile {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS
                .iter()
                .map(|(field, label)| (field.to_string(), label.to_string()))
                .collect(),
            fill: DEFAULT_FILL.iter().map(|s| s.to_string()).collect(),
            numeric: DEFAULT_NUMERIC.iter().map(|s| s.to_string()).collect(),
            dimension_marker: default_dimension_marker(),
            part_number: PartNumberRule::default(),
        }
    }
}

impl ColumnProfile {
    /// TOML文字列からプロファイルを読み込む
    pub fn from_toml_str(source: &str) -> Result<Self, FilmPackError> {
        Ok(toml::from_str(source)?)
    }

    /// TOMLファイルからプロファイルを読み込む
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FilmPackError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// 論理フィールド名に対応するヘッダー名
    pub fn label(&self, field: &str) -> Option<&str> {
        self.labels.get(field).map(String::as_str)
    }

    /// ヘッダー名が寸法列を表すかどうか
    pub fn is_dimension(&self, label: &str) -> bool {
        label.contains(self.dimension_marker.as_str())
    }

    /// 前方補完する列のヘッダー名
    pub(crate) fn fill_labels(&self) -> Vec<&str> {
        self.fill.iter().filter_map(|f| self.label(f)).collect()
    }

    /// 数値クリーニングする列のヘッダー名と寸法フラグ
    pub(crate) fn numeric_labels(&self) -> Vec<(&str, bool)> {
        self.numeric
            .iter()
            .filter_map(|f| self.label(f))
            .map(|label| (label, self.is_dimension(label)))
            .collect()
    }

    /// プロファイルの整合性を検証する
    ///
    /// # 発生し得るエラー
    ///
    /// * `FilmPackError::Config` - ラベルのない論理フィールド名が`fill`/`numeric`にある場合、
    ///   品番列名または寸法マーカーが空の場合
    pub fn validate(&self) -> Result<(), FilmPackError> {
        for (list, fields) in [("fill", &self.fill), ("numeric", &self.numeric)] {
            if let Some(field) = fields.iter().find(|f| !self.labels.contains_key(f.as_str())) {
                return Err(FilmPackError::Config(format!(
                    "Field '{}' in '{}' has no header label",
                    field, list
                )));
            }
        }

        if self.part_number.exact.is_empty() {
            return Err(FilmPackError::Config(
                "Part number header must not be empty".to_string(),
            ));
        }

        if self.dimension_marker.is_empty() {
            return Err(FilmPackError::Config(
                "Dimension marker must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
