//! Column Fill Propagator
//!
//! 結合セルとして入力された列（上のセルと同じ値を空欄で表現している列）を、
//! 直前の空でない値で上から順に埋める。

use crate::types::{RawCell, RawTable};

/// 指定した列の空セルを直前の値で埋める
///
/// 表に存在しない列名は無視します。先頭から最初の値が現れるまでの空セルは
/// 引き継ぐ値がないため空のまま残ります。
///
/// # 戻り値
///
/// 埋めたセルの数
pub fn fill_forward<S: AsRef<str>>(table: &mut RawTable, columns: &[S]) -> usize {
    let mut filled = 0;

    for name in columns {
        let Some(index) = table.column_index(name.as_ref()) else {
            continue;
        };
        filled += fill_column(table, index);
    }

    filled
}

/// 1列分の前方補完
pub(crate) fn fill_column(table: &mut RawTable, index: usize) -> usize {
    let mut last: Option<RawCell> = None;
    let mut filled = 0;

    for cell in table.column_mut(index) {
        if !cell.is_empty() {
            last = Some(cell.clone());
        } else if let Some(previous) = &last {
            *cell = previous.clone();
            filled += 1;
        }
    }

    filled
}
