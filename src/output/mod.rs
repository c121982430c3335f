//! Output Format Module
//!
//! 変換結果（`PriceTable`）の書き出しを提供するモジュール。
//! 出力フォーマットごとのフォーマッターをenumで切り替えます。

mod formatters;

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::api::OutputFormat;
use crate::error::CmedError;
use crate::types::PriceTable;

pub(crate) use formatters::{JsonFormatter, ZipFormatter};

/// 出力フォーマッター
#[derive(Debug, Clone, Copy)]
pub(crate) enum OutputFormatter {
    Json,
    Zip,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => OutputFormatter::Json,
            OutputFormat::Zip => OutputFormatter::Zip,
        }
    }

    /// 変換結果を指定されたフォーマットで出力する
    ///
    /// # 引数
    ///
    /// * `table` - 出力する変換結果
    /// * `entry_name` - ZIP内のJSONエントリ名（JSON形式では未使用）
    /// * `writer` - 出力先のライター
    pub fn render<W: Write>(
        &self,
        table: &PriceTable,
        entry_name: &str,
        writer: &mut W,
    ) -> Result<(), CmedError> {
        match self {
            OutputFormatter::Json => JsonFormatter.render(table, writer),
            OutputFormatter::Zip => ZipFormatter.render(table, entry_name, writer),
        }
    }
}

/// 入力ファイルのパスから出力ファイルのパスを決定する
///
/// 入力と同じディレクトリに、拡張子だけを置き換えたパスを返します。
/// 例: `dados/cmed.xlsx` → `dados/cmed.json`
pub fn output_path(input: &Path, format: OutputFormat) -> PathBuf {
    input.with_extension(format.extension())
}

/// ZIP内のJSONエントリ名（入力ファイルのベース名 + `.json`）
pub(crate) fn json_entry_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "cmed".to_string());
    format!("{}.{}", stem, OutputFormat::Json.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("dados/cmed.xlsx"), OutputFormat::Json),
            PathBuf::from("dados/cmed.json")
        );
        assert_eq!(
            output_path(Path::new("dados/cmed.xlsx"), OutputFormat::Zip),
            PathBuf::from("dados/cmed.zip")
        );
        assert_eq!(
            output_path(Path::new("/tmp/tabela.v2.xlsx"), OutputFormat::Json),
            PathBuf::from("/tmp/tabela.v2.json")
        );
    }

    #[test]
    fn test_json_entry_name() {
        assert_eq!(json_entry_name(Path::new("dados/cmed.xlsx")), "cmed.json");
        assert_eq!(json_entry_name(Path::new("tabela.v2.xlsx")), "tabela.v2.json");
        assert_eq!(json_entry_name(Path::new("")), "cmed.json");
    }
}
