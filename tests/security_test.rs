//! Security Tests
//!
//! 入力サイズ制限と、スプレッドシートではない入力に対する挙動を検証します。

use rust_xlsxwriter::Workbook;
use std::io::Cursor;
use filmpack::{FilmPackError, PackerBuilder};

fn small_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "PartNumber").unwrap();
    worksheet.write_string(1, 0, "ECWFD2E474JA").unwrap();
    workbook.save_to_buffer().unwrap()
}

/// 入力サイズが上限を超えた場合はSecurityViolation
#[test]
fn test_input_size_limit_exceeded() {
    let data = small_workbook();
    let packer = PackerBuilder::new()
        .with_max_input_size(data.len() as u64 - 1)
        .build()
        .unwrap();

    match packer.convert_to_string(Cursor::new(data)) {
        Err(FilmPackError::SecurityViolation(msg)) => {
            assert!(msg.contains("Input file size exceeds maximum"));
        }
        other => panic!("Expected SecurityViolation, got {:?}", other),
    }
}

/// 上限ちょうどのサイズは許可される
#[test]
fn test_input_size_at_limit() {
    let data = small_workbook();
    let packer = PackerBuilder::new()
        .with_max_input_size(data.len() as u64)
        .build()
        .unwrap();

    let script = packer.convert_to_string(Cursor::new(data)).unwrap();
    assert!(script.contains("ECWFD2E474JA"));
}

/// サイズ制限に違反した場合は出力ファイルを作成しない
#[test]
fn test_size_violation_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.xlsx");
    let output = dir.path().join("film_data.js");
    std::fs::write(&input, small_workbook()).unwrap();

    let packer = PackerBuilder::new().with_max_input_size(16).build().unwrap();
    let result = packer.pack_file(&input, &output);

    assert!(matches!(result, Err(FilmPackError::SecurityViolation(_))));
    assert!(!output.exists());
}

/// スプレッドシートではない入力はParseエラー
#[test]
fn test_non_spreadsheet_input() {
    let packer = PackerBuilder::new().build().unwrap();
    let result = packer.convert_to_string(Cursor::new(b"<script>alert(1)</script>".to_vec()));

    match result {
        Err(FilmPackError::Parse(_)) | Err(FilmPackError::Io(_)) => {}
        other => panic!("Expected Parse or Io error, got {:?}", other),
    }
}

/// 定数名にスクリプトを埋め込むことはできない
#[test]
fn test_constant_name_injection_rejected() {
    let result = PackerBuilder::new()
        .with_constant_name("x = 1; alert(1); const y")
        .build();

    assert!(matches!(result, Err(FilmPackError::Config(_))));
}

/// セル内の引用符や`};`はJSON文字列としてエスケープされ、宣言文の外に出ない
#[test]
fn test_cell_content_stays_inside_string() {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "PartNumber").unwrap();
    worksheet.write_string(1, 0, "P\"1\"};alert(1);//").unwrap();
    let data = workbook.save_to_buffer().unwrap();

    let script = PackerBuilder::new()
        .build()
        .unwrap()
        .convert_to_string(Cursor::new(data))
        .unwrap();

    assert!(script.contains(r#""P\"1\"};alert(1);//""#));
    let (_, packed) = filmpack::parse_script(&script).unwrap();
    assert_eq!(packed.d.len(), 1);
}
