//! Row Extraction Module
//!
//! ヘッダー行の検出と、データ行からレコードへの変換を行うモジュール。
//!
//! 行は2状態のステートマシンで処理されます:
//!
//! - `SeekingHeader`: 先頭セルが`SUBSTÂNCIA`の行を探す。それまでの行は備考として収集する
//! - `MappingRows`: 以降のすべての行をレコードに変換する（終端状態）

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::aggregate::Aggregator;
use crate::coerce::coerce;
use crate::error::CmedError;
use crate::schema::{Column, COLUMN_COUNT};
use crate::types::{Record, Row};

/// 抽出処理の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SeekingHeader,
    MappingRows,
}

/// 抽出結果
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// ヘッダー行より前にあった行の先頭セル
    pub observations: Vec<String>,

    /// 明細レコード（元の行順）
    pub records: Vec<Record>,

    /// CNPJ → 製造業者名
    pub laboratories: IndexMap<String, Option<String>>,

    /// アクセント記号を除去した剤形の一覧
    pub presentations: Vec<String>,

    /// ヘッダー行が見つかったかどうか
    pub header_found: bool,
}

/// 行を1行ずつ受け取り、レコードを構築する抽出器
#[derive(Debug)]
pub(crate) struct TableExtractor {
    state: State,
    validate_header: bool,
    row_index: usize,
    observations: Vec<String>,
    records: Vec<Record>,
    aggregator: Aggregator,
    /// スキーマの列数を超えて値が入っていたセルの数
    overflow_cells: usize,
}

impl TableExtractor {
    /// 新しい抽出器を生成
    ///
    /// # 引数
    ///
    /// * `validate_header` - ヘッダー行の列名をスキーマと照合するかどうか
    pub fn new(validate_header: bool) -> Self {
        Self {
            state: State::SeekingHeader,
            validate_header,
            row_index: 0,
            observations: Vec::new(),
            records: Vec::new(),
            aggregator: Aggregator::new(),
            overflow_cells: 0,
        }
    }

    /// 1行を処理する
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 処理に成功した場合
    /// * `Err(CmedError::InvalidHeader)` - ヘッダー照合が有効で、列名が一致しない場合
    pub fn push_row(&mut self, row: &[Option<String>]) -> Result<(), CmedError> {
        let row_index = self.row_index;
        self.row_index += 1;

        match self.state {
            State::SeekingHeader => {
                if is_header_row(row) {
                    if self.validate_header {
                        check_header(row)?;
                    }
                    debug!(row = row_index, "header row found");
                    self.state = State::MappingRows;
                } else if let Some(first) = row.first() {
                    self.observations.push(first.clone().unwrap_or_default());
                }
            }
            State::MappingRows => {
                let record = map_row(row);
                self.aggregator.add(&record);
                self.records.push(record);

                if row.len() > COLUMN_COUNT {
                    self.overflow_cells += row[COLUMN_COUNT..].iter().filter(|c| c.is_some()).count();
                }
            }
        }

        Ok(())
    }

    /// 抽出結果を取り出す
    pub fn finish(self) -> Extraction {
        let header_found = self.state == State::MappingRows;

        if !header_found {
            warn!(
                rows = self.row_index,
                "header row starting with '{}' not found, no records extracted",
                Column::Substancia.name()
            );
        }
        if self.overflow_cells > 0 {
            warn!(
                cells = self.overflow_cells,
                "cells beyond the last known column were ignored"
            );
        }

        let (laboratories, presentations) = self.aggregator.finish();

        Extraction {
            observations: self.observations,
            records: self.records,
            laboratories,
            presentations,
            header_found,
        }
    }
}

/// 行の並びからレコードを抽出する
///
/// ヘッダー行が見つからない場合もエラーにはならず、レコード0件の結果を返します。
///
/// # 使用例
///
/// ```rust
/// use cmedjson::extract;
///
/// let rows = vec![
///     vec![Some("Observação".to_string())],
///     vec![Some("SUBSTÂNCIA".to_string()), Some("CNPJ".to_string())],
///     vec![Some("DIPIRONA".to_string()), Some("00.000.000/0001-00".to_string())],
/// ];
///
/// let extraction = extract(rows, false)?;
/// assert_eq!(extraction.observations, vec!["Observação"]);
/// assert_eq!(extraction.records.len(), 1);
/// # Ok::<(), cmedjson::CmedError>(())
/// ```
pub fn extract<I>(rows: I, validate_header: bool) -> Result<Extraction, CmedError>
where
    I: IntoIterator<Item = Row>,
{
    let mut extractor = TableExtractor::new(validate_header);
    for row in rows {
        extractor.push_row(&row)?;
    }
    Ok(extractor.finish())
}

/// ヘッダー行かどうかを判定（先頭セルの完全一致）
fn is_header_row(row: &[Option<String>]) -> bool {
    matches!(row.first(), Some(Some(first)) if first == Column::Substancia.name())
}

/// ヘッダー行の列名をスキーマと照合する
fn check_header(row: &[Option<String>]) -> Result<(), CmedError> {
    for column in Column::ALL {
        let found = row
            .get(column.index())
            .and_then(|cell| cell.as_deref())
            .unwrap_or("")
            .trim();

        if found != column.name() {
            return Err(CmedError::InvalidHeader {
                column: column.index(),
                found: found.to_string(),
                expected: column.name(),
            });
        }
    }
    Ok(())
}

/// データ行をレコードに変換する
fn map_row(row: &[Option<String>]) -> Record {
    let values = Column::ALL
        .iter()
        .map(|column| {
            let raw = row.get(column.index()).and_then(|cell| cell.as_deref());
            coerce(raw, column.name())
        })
        .collect();
    Record::from_values(values)
}
