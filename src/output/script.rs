//! Script Writer
//!
//! `PackedData`をJavaScriptの定数宣言1文として出力する。
//! JSONは区切り文字の前後に空白を入れないコンパクト形式で、非ASCII文字はエスケープしない。

use std::io::Write;

use crate::error::FilmPackError;
use crate::types::PackedData;

/// デフォルトの定数名
pub const DEFAULT_CONSTANT_NAME: &str = "packedData";

const DECLARATION: &str = "const ";
const ASSIGNMENT: &str = " = ";
const TERMINATOR: char = ';';

/// JavaScriptの識別子として使える名前かを判定
///
/// `[A-Za-z_$][A-Za-z0-9_$]*`のみを許可します。
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// 埋め込み用スクリプトのライター
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptWriter {
    constant_name: String,
}

impl Default for ScriptWriter {
    fn default() -> Self {
        Self::new(DEFAULT_CONSTANT_NAME)
    }
}

impl ScriptWriter {
    /// 定数名を指定してライターを生成
    ///
    /// 定数名の検証は`PackerBuilder::build()`で行います。
    pub fn new(constant_name: impl Into<String>) -> Self {
        Self {
            constant_name: constant_name.into(),
        }
    }

    /// 出力する定数名
    pub fn constant_name(&self) -> &str {
        &self.constant_name
    }

    /// スクリプト全体を文字列として生成
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use filmpack::{PackedData, Scalar, ScriptWriter};
    ///
    /// let data = PackedData {
    ///     h: vec!["PartNumber".to_string(), "Height\n(mm)".to_string()],
    ///     d: vec![vec![Scalar::Text("ECW".to_string()), Scalar::Float(31.5)]],
    /// };
    /// let script = ScriptWriter::default().render(&data).unwrap();
    /// assert_eq!(
    ///     script,
    ///     r#"const packedData = {"h":["PartNumber","Height\n(mm)"],"d":[["ECW",31.5]]};"#
    /// );
    /// ```
    pub fn render(&self, data: &PackedData) -> Result<String, FilmPackError> {
        let json = serde_json::to_string(data)?;
        let mut script = String::with_capacity(
            DECLARATION.len() + self.constant_name.len() + ASSIGNMENT.len() + json.len() + 1,
        );
        script.push_str(DECLARATION);
        script.push_str(&self.constant_name);
        script.push_str(ASSIGNMENT);
        script.push_str(&json);
        script.push(TERMINATOR);
        Ok(script)
    }

    /// スクリプトをライターへ出力
    pub fn write<W: Write>(&self, data: &PackedData, writer: &mut W) -> Result<(), FilmPackError> {
        let script = self.render(data)?;
        writer.write_all(script.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

/// 生成済みスクリプトから定数名と`PackedData`を取り出す
///
/// # 発生し得るエラー
///
/// * `FilmPackError::Config` - `const <名前> = ...;`の形式でない場合
/// * `FilmPackError::Json` - JSON部分を解析できない場合
pub fn parse_script(script: &str) -> Result<(String, PackedData), FilmPackError> {
    let malformed = || FilmPackError::Config("Not a packed data script".to_string());

    let body = script
        .trim()
        .strip_prefix(DECLARATION)
        .ok_or_else(malformed)?;
    let (name, json) = body.split_once(ASSIGNMENT).ok_or_else(malformed)?;
    let json = json.strip_suffix(TERMINATOR).ok_or_else(malformed)?;

    if !is_valid_identifier(name) {
        return Err(malformed());
    }

    let data: PackedData = serde_json::from_str(json)?;
    Ok((name.to_string(), data))
}
