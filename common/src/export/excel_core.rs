//! Excel生成（共通ライブラリ）
//!
//! 3列（バーコード・フォーマット・読取日時）の一覧シートを生成

use super::{ExportRow, HEADERS};
use rust_xlsxwriter::*;

/// 列幅（文字数）
const COLUMN_WIDTHS: [f64; 3] = [24.0, 16.0, 22.0];

/// Excelをバッファに生成
///
/// # Arguments
/// * `rows` - 出力行（先頭行が1行目のデータになる）
/// * `sheet_name` - シート名
pub fn generate_excel_buffer(rows: &[ExportRow], sheet_name: &str) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    // バーコードは数値に変換させない
    let text_format = Format::new().set_num_format("@");

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
    }

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    }

    for (index, row) in rows.iter().enumerate() {
        let excel_row = index as u32 + 1;
        for (col, value) in row.cells().iter().enumerate() {
            worksheet
                .write_string_with_format(excel_row, col as u16, *value, &text_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
