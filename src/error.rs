//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// filmpackクレート全体で使用するエラー型
///
/// スプレッドシートの読み込み、列プロファイルの解析、パック処理、
/// 出力スクリプトの生成中に発生するエラーを統一的に扱います。
///
/// セル単位・行単位の異常（数値に変換できないセル、品番が空の行など）は
/// エラーにならず、`null`・元の値・行の除外として処理されます。
/// このエラー型が表すのは、実行全体を中断すべき異常のみです。
///
/// # 使用例
///
/// ```rust,no_run
/// use filmpack::FilmPackError;
/// use std::fs::File;
///
/// fn open_sheet(path: &str) -> Result<(), FilmPackError> {
///     let _file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum FilmPackError {
    /// I/O操作中に発生したエラー
    ///
    /// 入力ファイルの読み込み失敗、出力ファイルの書き込み失敗など。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの解析中に発生したエラー（calamine由来）
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// 出力ペイロードのJSONシリアライズ・デシリアライズエラー
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 列プロファイル（TOML）の解析エラー
    #[error("Failed to parse column profile: {0}")]
    Profile(#[from] toml::de::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `PackerBuilder::build()`時の検証や、ヘッダーより長い行を含む表など。
    #[error("Configuration error: {0}")]
    Config(String),

    /// 品番列が見つからないエラー
    ///
    /// `PartNumberPolicy::FailFast`（デフォルト）で、データ行があるにもかかわらず
    /// 品番列を特定できなかった場合に発生します。
    #[error("Part number column not found: no header equals {exact:?} or contains any of {contains:?}")]
    MissingPartNumberColumn {
        /// 完全一致で探したヘッダー名
        exact: String,
        /// 部分一致で探した文字列
        contains: Vec<String>,
    },

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限を超えた場合などに発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: FilmPackError = io_err.into();

        match error {
            FilmPackError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_parse_error_display() {
        let parse_err = calamine::Error::Msg("Corrupted file");
        let error: FilmPackError = parse_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("Failed to parse spreadsheet"));
        assert!(error_msg.contains("Corrupted file"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: FilmPackError = json_err.into();
        assert!(matches!(error, FilmPackError::Json(_)));
        assert!(error.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_profile_error_conversion() {
        let toml_err = toml::from_str::<toml::Table>("fill = [").unwrap_err();
        let error: FilmPackError = toml_err.into();
        assert!(matches!(error, FilmPackError::Profile(_)));
        assert!(error
            .to_string()
            .starts_with("Failed to parse column profile"));
    }

    #[test]
    fn test_missing_part_number_display() {
        let error = FilmPackError::MissingPartNumberColumn {
            exact: "PartNumber".to_string(),
            contains: vec!["PartNumber".to_string(), "Part Number".to_string()],
        };

        let error_msg = error.to_string();
        assert!(error_msg.contains("Part number column not found"));
        assert!(error_msg.contains("\"PartNumber\""));
        assert!(error_msg.contains("\"Part Number\""));
    }

    // エラー変換のテスト（?演算子の動作確認）
    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), FilmPackError> {
            let _file = std::fs::File::open("nonexistent_film_data.xlsx")?;
            Ok(())
        }

        match io_operation() {
            Err(FilmPackError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    #[test]
    fn test_all_error_formats() {
        let io_err: FilmPackError = io::Error::other("test io").into();
        assert!(io_err.to_string().starts_with("IO error"));

        let config_err = FilmPackError::Config("test config".to_string());
        assert!(config_err.to_string().starts_with("Configuration error"));

        let security_err = FilmPackError::SecurityViolation("too big".to_string());
        assert!(security_err.to_string().starts_with("Security violation"));
    }
}
