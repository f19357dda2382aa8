//! Parser Module
//!
//! calamineを使用したスプレッドシート読み込みの実装。
//! 最初のワークシートを、ヘッダー行とデータ行からなる`RawTable`へ変換します。

mod header;
mod workbook;

pub(crate) use workbook::WorkbookReader;
