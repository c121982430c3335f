//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// cmedjsonクレート全体で使用するエラー型
///
/// CMEDスプレッドシートの読み込み、行の抽出、JSON/ZIPへの書き出し中に
/// 発生するすべてのエラーを統一的に扱うために使用されます。
///
/// 通貨列の不正な数値はエラーではありません（文字列として出力されます）。
///
/// # 使用例
///
/// ```rust,no_run
/// use cmedjson::CmedError;
/// use std::fs::File;
///
/// fn open_table(path: &str) -> Result<File, CmedError> {
///     let file = File::open(path)?; // io::Error → CmedError::Io
///     Ok(file)
/// }
/// ```
#[derive(Error, Debug)]
pub enum CmedError {
    /// I/O操作中に発生したエラー
    ///
    /// 入力ファイルの読み込み失敗、出力ファイルの作成失敗など。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelファイルの解析中に発生したエラー
    ///
    /// calamineクレートがワークブックまたはシートを読めなかった場合に発生します。
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// JSONシリアライズのエラー
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// ZIPアーカイブの書き込みエラー
    #[error("ZIP archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// 設定の検証に失敗したエラー
    ///
    /// シート選択時などに発生します。
    /// 例えば、指定したシートが存在しない場合や、入力がXLSX形式でない場合などです。
    #[error("Configuration error: {0}")]
    Config(String),

    /// ヘッダー行が見つからなかったエラー
    ///
    /// `require_header(true)`が指定されている場合のみ発生します。
    /// デフォルトでは、ヘッダーなしのシートは0件の明細として扱われます。
    #[error("Header row starting with '{0}' not found")]
    HeaderNotFound(&'static str),

    /// ヘッダー行の列名が期待値と一致しないエラー
    ///
    /// `validate_header(true)`が指定されている場合のみ発生します。
    #[error("Invalid header at column {column}: found '{found}', expected '{expected}'")]
    InvalidHeader {
        /// 列の位置（0始まり）
        column: usize,
        /// シート上で見つかった列名
        found: String,
        /// スキーマ上の列名
        expected: &'static str,
    },

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限超過や、不正なアーカイブエントリ名など。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}
