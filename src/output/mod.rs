//! Output Module
//!
//! パック済みデータを埋め込み用スクリプト（`const <名前> = {...};`）として
//! 出力・再読み込みする機能を提供するモジュール。

mod script;

pub use script::{is_valid_identifier, parse_script, ScriptWriter, DEFAULT_CONSTANT_NAME};
