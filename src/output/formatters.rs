//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::CmedError;
use crate::security::validate_entry_name;
use crate::types::PriceTable;

/// JSON形式のフォーマッター
///
/// 2スペースインデントのJSONと末尾の改行を出力します。
pub(crate) struct JsonFormatter;

impl JsonFormatter {
    pub fn render<W: Write>(&self, table: &PriceTable, writer: &mut W) -> Result<(), CmedError> {
        serde_json::to_writer_pretty(&mut *writer, table)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// ZIP形式のフォーマッター
///
/// JSONを1エントリだけ含むアーカイブを出力します。
/// アーカイブはメモリ上で完成させてから書き出すため、途中で失敗しても
/// 不完全なアーカイブは出力されません。
pub(crate) struct ZipFormatter;

impl ZipFormatter {
    pub fn render<W: Write>(
        &self,
        table: &PriceTable,
        entry_name: &str,
        writer: &mut W,
    ) -> Result<(), CmedError> {
        validate_entry_name(entry_name).map_err(CmedError::SecurityViolation)?;

        let mut json = Vec::new();
        JsonFormatter.render(table, &mut json)?;

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file(entry_name, options)?;
        zip.write_all(&json)?;
        let archive = zip.finish()?.into_inner();

        writer.write_all(&archive)?;
        writer.flush()?;
        Ok(())
    }
}
