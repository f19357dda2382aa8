//! Header Module
//!
//! ヘッダー行のセルを列名へ変換する。
//! 空のヘッダーには`Unnamed: <列番号>`を、重複したヘッダーには`.1`、`.2`…の接尾辞を付けます。

use std::collections::{HashMap, HashSet};

use calamine::Data;

use super::workbook::cell_value;
use crate::types::RawCell;

/// ヘッダーセルを列名に変換
///
/// 文字列はトリムせずそのまま使います。
pub(crate) fn header_label(cell: &Data, index: usize) -> String {
    match cell {
        Data::String(s) if !s.is_empty() => s.clone(),
        Data::String(_) | Data::Empty => unnamed(index),
        Data::Bool(b) => String::from(if *b { "True" } else { "False" }),
        other => match cell_value(other) {
            RawCell::Number(n) => format_number(n),
            RawCell::Text(t) => t,
            RawCell::Empty => unnamed(index),
        },
    }
}

fn unnamed(index: usize) -> String {
    format!("Unnamed: {}", index)
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.trunc() == n && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// 重複した列名に接尾辞を付けて一意にする
pub(crate) fn dedupe_headers(names: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(names.len());
    let mut suffixes: HashMap<String, usize> = HashMap::new();
    let mut result = Vec::with_capacity(names.len());

    for name in names {
        if taken.insert(name.clone()) {
            result.push(name);
            continue;
        }

        let mut suffix = suffixes.get(&name).copied().unwrap_or(0);
        let unique = loop {
            suffix += 1;
            let candidate = format!("{}.{}", name, suffix);
            if !taken.contains(&candidate) {
                break candidate;
            }
        };

        suffixes.insert(name, suffix);
        taken.insert(unique.clone());
        result.push(unique);
    }

    result
}
