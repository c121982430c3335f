//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// シート選択方式
///
/// 価格表を読み込むシートを選択する方法を指定します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 先頭のシート（デフォルト）
    #[default]
    First,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(1)` は2番目のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Planilha1".to_string())`
    Name(String),
}

/// 出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputFormat {
    /// インデント付きJSON（デフォルト）
    ///
    /// # 出力例
    ///
    /// ```json
    /// {
    ///   "metadados": {
    ///     "data": "2024-03-01",
    ///     "data-atualizacao": "2024-03-01",
    ///     "observacoes": []
    ///   },
    ///   "medicamentos": [],
    ///   "laboratorios": {},
    ///   "apresentacoes": []
    /// }
    /// ```
    #[default]
    Json,

    /// JSONを1エントリだけ含むZIPアーカイブ
    ///
    /// エントリ名は入力ファイルと同じベース名に`.json`を付けたものです。
    Zip,
}

impl OutputFormat {
    /// 出力ファイルの拡張子
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Zip => "zip",
        }
    }
}
