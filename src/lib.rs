//! cmedjson - CMED drug price spreadsheet to JSON converter
//!
//! ブラジルの医薬品価格表（CMED）のスプレッドシート（XLSX）を読み込み、
//! 構造化されたJSON（またはJSONを含むZIP）に変換するクレートです。
//!
//! 固定の73列レイアウトを前提に、各セルを列の意味（価格・論理値・テキスト）に
//! 応じて型変換し、製造業者ルックアップと剤形一覧を併せて出力します。
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use cmedjson::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 基準日は今日、出力はJSON
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // cmed.xlsx → cmed.json
//!     let output = converter.convert_file(Path::new("cmed.xlsx"))?;
//!     println!("Arquivo {} criado!", output.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! # In-memory conversion
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use cmedjson::ConverterBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = ConverterBuilder::new().build()?;
//! let excel_data: Vec<u8> = vec![]; // XLSXファイルのバイト列
//! let table = converter.convert(Cursor::new(excel_data))?;
//!
//! let mut json = Vec::new();
//! converter.write(&table, "cmed.json", &mut json)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use std::path::Path;
//! use cmedjson::{ConverterBuilder, OutputFormat, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_sheet_selector(SheetSelector::Index(0))
//!         .with_reference_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
//!         .with_update_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
//!         .with_output_format(OutputFormat::Zip)  // cmed.zip（cmed.jsonを含む）
//!         .require_header(true)
//!         .validate_header(true)
//!         .build()?;
//!
//!     converter.convert_file(Path::new("cmed.xlsx"))?;
//!     Ok(())
//! }
//! ```

mod aggregate;
mod api;
mod builder;
mod coerce;
mod error;
mod extract;
pub mod logging;
mod normalize;
mod output;
mod parser;
mod schema;
mod security;
mod types;

// 公開API
pub use api::{OutputFormat, SheetSelector};
pub use builder::{Converter, ConverterBuilder};
pub use coerce::coerce;
pub use error::CmedError;
pub use extract::{extract, Extraction};
pub use normalize::fold_accents;
pub use output::output_path;
pub use parser::{RowSource, WorkbookReader};
pub use schema::{classify, Column, ColumnClass, COLUMN_COUNT};
pub use types::{CellValue, Metadata, PriceTable, Record, Row};
