//! Dimension Cleaner
//!
//! 数値列・寸法列のセルを数値へ変換する。
//!
//! 元データには小数点の入力漏れ（`31.5`を`315`と入力）が含まれるため、
//! 寸法列（ミリメートル単位）に限り、100を超える値を10で割って補正する。
//! 電圧・静電容量・許容差などの非寸法列には補正を適用しない。

use crate::types::RawCell;

/// 寸法として妥当な上限値（mm）。これを超える値は小数点の入力漏れとみなす
pub const DIMENSION_LIMIT_MM: f64 = 100.0;

/// 欠損値を表す単独のハイフン
const DASH_MARKER: &str = "-";

/// 数値列のセルをクリーニングする
///
/// # 引数
///
/// * `cell` - 生のセル値
/// * `is_dimension` - 寸法列（mm）かどうか
///
/// # 戻り値
///
/// * 空セル・空文字列・`"-"` → `RawCell::Empty`
/// * 数値 → そのまま（寸法列で100超の場合は10で割る）
/// * 文字列 → カンマを小数点に置換し、数字・`.`・`-`以外を除去して数値化
///   （寸法列で100超の場合は10で割る）
/// * 数値化できない文字列 → 元の`RawCell::Text`をそのまま返す
pub fn clean_numeric(cell: &RawCell, is_dimension: bool) -> RawCell {
    match cell {
        RawCell::Empty => RawCell::Empty,
        RawCell::Number(n) => RawCell::Number(rescale(*n, is_dimension)),
        RawCell::Text(s) if s.is_empty() || s == DASH_MARKER => RawCell::Empty,
        RawCell::Text(s) => match parse_loose_number(s) {
            Some(n) => RawCell::Number(rescale(n, is_dimension)),
            None => cell.clone(),
        },
    }
}

/// 小数点の入力漏れを補正する
fn rescale(value: f64, is_dimension: bool) -> f64 {
    if is_dimension && value > DIMENSION_LIMIT_MM {
        value / 10.0
    } else {
        value
    }
}

/// 10進数字ブロックの`0`に相当する文字（ASCII・アラビア・インド系・全角・数学用英数字）
const DECIMAL_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0xFF10,
    0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
];

/// 数字として扱う文字か
///
/// 分数・ローマ数字・漢数字の〇などは数字ではないため除去対象になります。
fn is_digit_char(c: char) -> bool {
    c.is_numeric()
        && !matches!(
            c,
            '\u{00BC}'..='\u{00BE}'
                | '\u{2150}'..='\u{218F}'
                | '\u{3007}'
                | '\u{3021}'..='\u{3029}'
                | '\u{3038}'..='\u{303A}'
        )
}

/// 10進数字をASCII数字へ変換する。上付き数字や丸数字は`None`
fn ascii_digit(c: char) -> Option<char> {
    let code = u32::from(c);
    DECIMAL_ZEROS.iter().find_map(|&zero| {
        code.checked_sub(zero)
            .filter(|d| *d < 10)
            .and_then(|d| char::from_digit(d, 10))
    })
}

/// 単位や記号の混じった文字列から数値を取り出す
///
/// `"31,5"` → `31.5`、`"≤ 12 mm"` → `12.0`、`"３１,５"` → `31.5`。
/// 残った文字列が数値として解釈できない場合（`""`、`"."`、`"1.2.3"`、`"5-10"`）や、
/// 10進数字以外の数字（`"10 mm²"`の`²`など）を含む場合は`None`。
fn parse_loose_number(text: &str) -> Option<f64> {
    let mut stripped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ',' => stripped.push('.'),
            '.' | '-' => stripped.push(c),
            c if is_digit_char(c) => stripped.push(ascii_digit(c)?),
            _ => {}
        }
    }

    stripped.parse::<f64>().ok()
}
