//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use chrono::{Local, NaiveDate};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::api::{OutputFormat, SheetSelector};
use crate::error::CmedError;
use crate::extract::extract;
use crate::output::{json_entry_name, output_path, OutputFormatter};
use crate::parser::{RowSource, WorkbookReader};
use crate::schema::Column;
use crate::types::{Metadata, PriceTable};

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 基準日（Noneの場合は`build()`時点の日付）
    pub reference_date: Option<NaiveDate>,

    /// 更新日（Noneの場合は基準日）
    pub update_date: Option<NaiveDate>,

    /// 出力フォーマット
    pub output_format: OutputFormat,

    /// ヘッダー行が見つからない場合にエラーとするか
    pub require_header: bool,

    /// ヘッダー行の列名をスキーマと照合するか
    pub validate_header: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::First,
            reference_date: None,
            update_date: None,
            output_format: OutputFormat::Json,
            require_header: false,
            validate_header: false,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use chrono::NaiveDate;
/// use cmedjson::{ConverterBuilder, OutputFormat};
///
/// # fn main() -> Result<(), cmedjson::CmedError> {
/// let converter = ConverterBuilder::new()
///     .with_reference_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
///     .with_output_format(OutputFormat::Zip)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: 先頭のシート
    /// - 基準日: 現在の日付
    /// - 更新日: 基準日と同じ
    /// - 出力フォーマット: JSON
    /// - ヘッダー必須: しない（ヘッダーなしのシートは0件として扱う）
    /// - ヘッダー照合: しない
    pub fn new() -> Self {
        Self::default()
    }

    /// 読み込むシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 価格表の基準日を指定する
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.config.reference_date = Some(date);
        self
    }

    /// 価格表の更新日を指定する
    ///
    /// 指定しない場合は基準日と同じ日付になります。
    pub fn with_update_date(mut self, date: NaiveDate) -> Self {
        self.config.update_date = Some(date);
        self
    }

    /// 出力フォーマットを指定する
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// ヘッダー行が見つからない場合にエラーとするかを指定する
    ///
    /// `true`の場合、`CmedError::HeaderNotFound`を返します。
    pub fn require_header(mut self, require: bool) -> Self {
        self.config.require_header = require;
        self
    }

    /// ヘッダー行の列名をスキーマと照合するかを指定する
    ///
    /// `true`の場合、列名が一致しなければ`CmedError::InvalidHeader`を返します。
    pub fn validate_header(mut self, validate: bool) -> Self {
        self.config.validate_header = validate;
        self
    }

    /// 設定を確定し、`Converter`インスタンスを生成する
    ///
    /// 日付は指定されたとおりに保持されます。更新日が基準日より前でもエラーにはせず、
    /// 警告ログを出すだけです。
    pub fn build(self) -> Result<Converter, CmedError> {
        // 1. 日付の確定
        let reference_date = self
            .config
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive());
        let update_date = self.config.update_date.unwrap_or(reference_date);

        // 2. 日付の前後関係は確認のみ
        if update_date < reference_date {
            warn!(
                %reference_date,
                %update_date,
                "update date is before the reference date"
            );
        }

        // 3. Converterインスタンス生成
        Ok(Converter {
            config: self.config,
            reference_date,
            update_date,
        })
    }
}

/// 変換処理のファサード
///
/// CMED価格表のワークブックを読み込み、`PriceTable`に変換して書き出すための
/// メインエントリーポイントです。
///
/// # 使用例
///
/// ```rust,no_run
/// use cmedjson::ConverterBuilder;
/// use std::path::Path;
///
/// # fn main() -> Result<(), cmedjson::CmedError> {
/// let converter = ConverterBuilder::new().build()?;
/// let written = converter.convert_file(Path::new("cmed.xlsx"))?;
/// println!("Arquivo {} criado!", written.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// 確定済みの基準日
    reference_date: NaiveDate,

    /// 確定済みの更新日
    update_date: NaiveDate,
}

impl Converter {
    /// ワークブックを読み込み、変換結果を返す
    ///
    /// # 引数
    ///
    /// * `input` - Excelファイルを読み込むためのリーダー
    ///
    /// # 戻り値
    ///
    /// * `Ok(PriceTable)` - 変換に成功した場合
    /// * `Err(CmedError)` - 読み込み・解析に失敗した場合
    pub fn convert<R: Read>(&self, input: R) -> Result<PriceTable, CmedError> {
        let mut reader = WorkbookReader::open(input, self.config.sheet_selector.clone())?;
        self.convert_rows(&mut reader)
    }

    /// 任意の行データ供給元から変換結果を生成する
    ///
    /// # 処理フロー
    ///
    /// 1. 行データの読み込み
    /// 2. ヘッダー検出・レコード変換・集計
    /// 3. メタデータの付与
    pub fn convert_rows<S: RowSource>(&self, source: &mut S) -> Result<PriceTable, CmedError> {
        let rows = source.rows()?;
        debug!(rows = rows.len(), "rows loaded");

        let extraction = extract(rows, self.config.validate_header)?;

        if self.config.require_header && !extraction.header_found {
            return Err(CmedError::HeaderNotFound(Column::Substancia.name()));
        }

        info!(
            records = extraction.records.len(),
            observations = extraction.observations.len(),
            laboratories = extraction.laboratories.len(),
            presentations = extraction.presentations.len(),
            "price table extracted"
        );

        Ok(PriceTable {
            metadata: Metadata {
                reference_date: self.reference_date,
                update_date: self.update_date,
                observations: extraction.observations,
            },
            records: extraction.records,
            laboratories: extraction.laboratories,
            presentations: extraction.presentations,
        })
    }

    /// 変換結果を設定された出力フォーマットで書き出す
    ///
    /// # 引数
    ///
    /// * `table` - 変換結果
    /// * `entry_name` - ZIP内のJSONエントリ名（JSON形式では未使用）
    /// * `output` - 出力先のライター
    pub fn write<W: Write>(
        &self,
        table: &PriceTable,
        entry_name: &str,
        mut output: W,
    ) -> Result<(), CmedError> {
        OutputFormatter::from_format(self.config.output_format).render(table, entry_name, &mut output)
    }

    /// ファイルを変換し、入力と同じディレクトリに出力ファイルを作成する
    ///
    /// 出力ファイル名は入力ファイルの拡張子を`.json`（ZIP形式では`.zip`）に置き換えたものです。
    /// 出力はメモリ上で完成させてから書き込むため、変換に失敗した場合は
    /// ファイルを作成しません。
    ///
    /// # 戻り値
    ///
    /// * `Ok(PathBuf)` - 作成した出力ファイルのパス
    /// * `Err(CmedError)` - 読み込み・変換・書き込みに失敗した場合
    pub fn convert_file(&self, input: &Path) -> Result<PathBuf, CmedError> {
        let table = self.convert(fs::File::open(input)?)?;

        let mut buffer = Vec::new();
        self.write(&table, &json_entry_name(input), &mut buffer)?;

        let output = output_path(input, self.config.output_format);
        fs::write(&output, buffer)?;
        info!(path = %output.display(), "output written");

        Ok(output)
    }

    /// 確定済みの基準日
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// 確定済みの更新日
    pub fn update_date(&self) -> NaiveDate {
        self.update_date
    }
}
