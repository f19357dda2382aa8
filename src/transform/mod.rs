//! Transform Module
//!
//! 表に対する列単位の変換処理（前方補完・数値クリーニング・セル正規化）を提供するモジュール。
//! いずれの処理も行の増減は行いません。

mod dimension;
mod fill;
mod normalize;

pub use dimension::{clean_numeric, DIMENSION_LIMIT_MM};
pub use fill::fill_forward;
pub use normalize::normalize_cell;

use tracing::debug;

use crate::types::{RawCell, RawTable};

/// 前方補完の対象列を処理する
///
/// # 戻り値
///
/// 埋めたセルの総数
pub(crate) fn fill_pass(table: &mut RawTable, labels: &[&str]) -> usize {
    let mut total = 0;
    for label in labels {
        match table.column_index(label) {
            Some(index) => {
                let filled = fill::fill_column(table, index);
                debug!(column = %label.escape_debug(), filled, "forward-filled column");
                total += filled;
            }
            None => debug!(column = %label.escape_debug(), "fill column not present, skipped"),
        }
    }
    total
}

/// 数値クリーニングの対象列を処理する
///
/// # 引数
///
/// * `labels` - 対象列のヘッダー名と、寸法列かどうかのフラグ
///
/// # 戻り値
///
/// 数値に変換できず元の値のまま残したセルの総数
pub(crate) fn clean_pass(table: &mut RawTable, labels: &[(&str, bool)]) -> usize {
    let mut total = 0;
    for &(label, is_dimension) in labels {
        let Some(index) = table.column_index(label) else {
            debug!(column = %label.escape_debug(), "numeric column not present, skipped");
            continue;
        };

        let mut fallbacks = 0;
        for cell in table.column_mut(index) {
            let cleaned = clean_numeric(cell, is_dimension);
            if matches!(cleaned, RawCell::Text(_)) {
                fallbacks += 1;
            }
            *cell = cleaned;
        }

        debug!(
            column = %label.escape_debug(),
            is_dimension,
            fallbacks,
            "cleaned numeric column"
        );
        total += fallbacks;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RawTable {
        RawTable::new(
            vec![
                "Height\n(mm)".to_string(),
                "Rated \nVoltage (V)".to_string(),
                "Note".to_string(),
            ],
            vec![
                vec![RawCell::Number(315.0), RawCell::Number(630.0), RawCell::from("x")],
                vec![RawCell::Empty, RawCell::from("1000"), RawCell::Empty],
                vec![RawCell::from("abc"), RawCell::from("-"), RawCell::from("315")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_clean_pass_scales_only_dimensions() {
        let mut table = table();
        let fallbacks = clean_pass(
            &mut table,
            &[("Height\n(mm)", true), ("Rated \nVoltage (V)", false)],
        );

        assert_eq!(fallbacks, 1);
        assert_eq!(table.rows()[0][0], RawCell::Number(31.5));
        assert_eq!(table.rows()[0][1], RawCell::Number(630.0));
        assert_eq!(table.rows()[1][1], RawCell::Number(1000.0));
        assert_eq!(table.rows()[2][0], RawCell::from("abc"));
        assert_eq!(table.rows()[2][1], RawCell::Empty);
        // 対象外の列はそのまま
        assert_eq!(table.rows()[2][2], RawCell::from("315"));
    }

    #[test]
    fn test_fill_then_clean_keeps_row_count() {
        let mut table = table();
        fill_pass(&mut table, &["Height\n(mm)", "Missing"]);
        clean_pass(&mut table, &[("Height\n(mm)", true)]);

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows()[1][0], RawCell::Number(31.5));
    }
}
