//! Workbook Reader
//!
//! calamineのラッパーとして、ワークブックを開き、選択したシートの行を文字列として取り出す。

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets, Xlsx};
use std::io::{Cursor, Read};
use tracing::debug;

use super::RowSource;
use crate::api::SheetSelector;
use crate::error::CmedError;
use crate::schema::{Column, ColumnClass};
use crate::security::SecurityConfig;
use crate::types::Row;

/// ワークブックリーダー
///
/// XLSX形式のみサポートします。入力全体をメモリに読み込んでから解析します。
pub struct WorkbookReader {
    /// calamineのワークブック
    workbook: Xlsx<Cursor<Vec<u8>>>,
    /// 読み込み対象のシート
    selector: SheetSelector,
}

impl WorkbookReader {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - Excelファイルを読み込むためのリーダー
    /// * `selector` - 読み込み対象のシート
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookReader)` - ワークブックの読み込みに成功した場合
    /// * `Err(CmedError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(CmedError::Parse)` - ワークブックとして解析できない場合
    /// * `Err(CmedError::Config)` - XLSX以外の形式の場合
    pub fn open<R: Read>(mut reader: R, selector: SheetSelector) -> Result<Self, CmedError> {
        let security_config = SecurityConfig::default();

        // セキュリティ: 上限+1バイトまでしか読まない
        let mut buffer = Vec::new();
        let bytes_read = reader
            .by_ref()
            .take(security_config.max_input_file_size + 1)
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > security_config.max_input_file_size {
            return Err(CmedError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes",
                security_config.max_input_file_size
            )));
        }

        let sheets = open_workbook_auto_from_rs(Cursor::new(buffer)).map_err(CmedError::Parse)?;
        let workbook = match sheets {
            Sheets::Xlsx(workbook) => workbook,
            _ => {
                return Err(CmedError::Config(
                    "Only XLSX format is supported".to_string(),
                ))
            }
        };

        Ok(Self { workbook, selector })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// シート選択方式に基づいてシート名を決定する
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(CmedError::Config)` - シートが見つからない、またはインデックスが範囲外の場合
    pub fn selected_sheet(&self) -> Result<String, CmedError> {
        let names = self.sheet_names();

        match &self.selector {
            SheetSelector::First => names
                .into_iter()
                .next()
                .ok_or_else(|| CmedError::Config("Workbook has no sheets".to_string())),

            SheetSelector::Index(index) => {
                let total = names.len();
                names.into_iter().nth(*index).ok_or_else(|| {
                    CmedError::Config(format!(
                        "Sheet index {} is out of range (total: {})",
                        index, total
                    ))
                })
            }

            SheetSelector::Name(name) => {
                if !names.contains(name) {
                    return Err(CmedError::Config(format!("Sheet '{}' not found", name)));
                }
                Ok(name.clone())
            }
        }
    }
}

impl RowSource for WorkbookReader {
    fn rows(&mut self) -> Result<Vec<Row>, CmedError> {
        let sheet_name = self.selected_sheet()?;

        let range = self
            .workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| CmedError::Parse(e.into()))?;

        // 使用範囲がA列以外から始まる場合、列位置がずれないように先頭を空セルで埋める
        let col_offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);

        let rows: Vec<Row> = range
            .rows()
            .map(|cells| {
                let mut row: Row = std::iter::repeat(None)
                    .take(col_offset)
                    .chain(
                        cells
                            .iter()
                            .enumerate()
                            .map(|(i, cell)| render_cell(cell, col_offset + i)),
                    )
                    .collect();
                // 行末の空セルは「セルなし」として扱う
                while matches!(row.last(), Some(None)) {
                    row.pop();
                }
                row
            })
            .collect();

        debug!(sheet = %sheet_name, rows = rows.len(), "sheet loaded");
        Ok(rows)
    }
}

/// 列位置を考慮してセル値を文字列に変換する
///
/// 価格列の整数値の数値セルは小数部付き（`7` → `7.0`）で文字列化し、
/// 価格パターンに一致させて数値として出力されるようにします。
fn render_cell(cell: &Data, column_index: usize) -> Option<String> {
    let is_currency = Column::from_index(column_index)
        .is_some_and(|column| column.class() == ColumnClass::Currency);

    match cell {
        Data::Float(f) if is_currency && f.is_finite() && f.fract() == 0.0 => {
            Some(format!("{:.1}", f))
        }
        Data::Int(i) if is_currency => Some(format!("{}.0", i)),
        _ => cell_to_string(cell),
    }
}

/// セル値を生の文字列に変換する（空セルは`None`）
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => Some(dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(e) => Some(format!("{:?}", e)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string() {
        assert_eq!(
            cell_to_string(&Data::String("12,34".to_string())),
            Some("12,34".to_string())
        );
        assert_eq!(cell_to_string(&Data::Float(10.5)), Some("10.5".to_string()));
        assert_eq!(cell_to_string(&Data::Float(10.0)), Some("10".to_string()));
        assert_eq!(cell_to_string(&Data::Int(7)), Some("7".to_string()));
        assert_eq!(cell_to_string(&Data::Bool(true)), Some("TRUE".to_string()));
        assert_eq!(cell_to_string(&Data::Empty), None);
    }

    #[test]
    fn test_render_cell_currency_numbers_keep_decimal() {
        let price = Column::PfSemImpostos.index();
        assert_eq!(render_cell(&Data::Float(7.0), price), Some("7.0".to_string()));
        assert_eq!(render_cell(&Data::Int(12), price), Some("12.0".to_string()));
        assert_eq!(render_cell(&Data::Float(10.5), price), Some("10.5".to_string()));
        assert_eq!(render_cell(&Data::Empty, price), None);
    }

    #[test]
    fn test_render_cell_other_columns_use_display() {
        assert_eq!(
            render_cell(&Data::Float(7891234567890.0), Column::Ean1.index()),
            Some("7891234567890".to_string())
        );
        assert_eq!(render_cell(&Data::Int(7), Column::Registro.index()), Some("7".to_string()));
        // 既知の列より右
        assert_eq!(render_cell(&Data::Float(3.0), 200), Some("3".to_string()));
    }

    #[test]
    fn test_open_rejects_non_workbook() {
        let result = WorkbookReader::open(Cursor::new(b"not a workbook".to_vec()), SheetSelector::First);
        assert!(matches!(result, Err(CmedError::Parse(_))));
    }

    #[test]
    fn test_in_memory_row_source() {
        let mut rows: Vec<Row> = vec![vec![Some("a".to_string())]];
        assert_eq!(rows.rows().unwrap().len(), 1);
        assert!(rows.rows().unwrap().is_empty());
    }
}
