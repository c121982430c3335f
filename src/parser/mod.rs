//! Parser Module
//!
//! calamineを使用したExcelファイル解析の実装。
//! 抽出処理へは`RowSource`トレイトを介して生の行データを渡します。

mod workbook;

pub use workbook::WorkbookReader;

use crate::error::CmedError;
use crate::types::Row;

/// 生の行データの供給元
///
/// 選択されたシートのすべての行を、元の行順のまま返します。
/// 各行はセル文字列の並びで、空セルは`None`です。
pub trait RowSource {
    /// すべての行を読み込む
    fn rows(&mut self) -> Result<Vec<Row>, CmedError>;
}

/// メモリ上の表（テストや他の読み込み元からの利用向け）
impl RowSource for Vec<Row> {
    fn rows(&mut self) -> Result<Vec<Row>, CmedError> {
        Ok(std::mem::take(self))
    }
}
