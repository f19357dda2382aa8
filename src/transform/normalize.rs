//! Cell Normalizer
//!
//! 生のセル値を出力用のスカラー値へ変換する。

use crate::types::{RawCell, Scalar};

/// i64で正確に表現できる範囲（2^63）
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// セル値を正規化する
///
/// * 空セル → `Scalar::Null`
/// * 小数部のない数値 → `Scalar::Int`
/// * 小数部のある数値 → `Scalar::Float`（丸めなし）
/// * 文字列 → 前後の空白を除去した`Scalar::Text`
///
/// エラーは発生しません。
pub fn normalize_cell(cell: &RawCell) -> Scalar {
    match cell {
        RawCell::Empty => Scalar::Null,
        RawCell::Number(n) => normalize_number(*n),
        RawCell::Text(s) => Scalar::Text(s.trim().to_string()),
    }
}

fn normalize_number(n: f64) -> Scalar {
    if n.is_finite() && n.trunc() == n && (-I64_BOUND..I64_BOUND).contains(&n) {
        Scalar::Int(n as i64)
    } else {
        Scalar::Float(n)
    }
}
