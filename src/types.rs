//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::schema::{Column, COLUMN_COUNT};

/// スプレッドシートの1行（生のセル文字列。`None`は空セル）
pub type Row = Vec<Option<String>>;

/// 型変換後のセル値
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 空セル、または`-`
    Null,

    /// 論理値（「Sim」/「Não」列）
    Bool(bool),

    /// 数値（価格列）
    Number(f64),

    /// 文字列
    Text(String),
}

impl CellValue {
    /// 値が`Null`かどうかを判定
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// 文字列値を取得（`Text`以外は`None`）
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// 数値を取得（`Number`以外は`None`）
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// 論理値を取得（`Bool`以外は`None`）
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_unit(),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// 医薬品1件分のレコード
///
/// スキーマの73列すべてについて値を保持します。
/// JSONにはスキーマ順のキーを持つオブジェクトとして出力されます。
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<CellValue>,
}

impl Record {
    /// スキーマ順の値から生成（内部用）
    pub(crate) fn from_values(values: Vec<CellValue>) -> Self {
        debug_assert_eq!(values.len(), COLUMN_COUNT);
        Self { values }
    }

    /// 列の値を取得
    pub fn get(&self, column: Column) -> &CellValue {
        &self.values[column.index()]
    }

    /// スキーマ順に（列, 値）を列挙
    pub fn iter(&self) -> impl Iterator<Item = (Column, &CellValue)> {
        Column::ALL.iter().copied().zip(self.values.iter())
    }

    /// 列数（常に73）
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 常に`false`
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column.name(), value)?;
        }
        map.end()
    }
}

/// 実行メタデータ
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Metadata {
    /// 基準日
    #[serde(rename = "data")]
    pub reference_date: NaiveDate,

    /// 更新日（未指定時は基準日）
    #[serde(rename = "data-atualizacao")]
    pub update_date: NaiveDate,

    /// ヘッダー行より前にあった自由記述行
    #[serde(rename = "observacoes")]
    pub observations: Vec<String>,
}

/// 変換結果（出力アーティファクト）
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PriceTable {
    /// 実行メタデータ
    #[serde(rename = "metadados")]
    pub metadata: Metadata,

    /// 明細レコード（元の行順）
    #[serde(rename = "medicamentos")]
    pub records: Vec<Record>,

    /// CNPJ → 製造業者名（最初に出現した値）
    #[serde(rename = "laboratorios")]
    pub laboratories: IndexMap<String, Option<String>>,

    /// アクセント記号を除去した剤形の一覧（出現順、重複なし）
    #[serde(rename = "apresentacoes")]
    pub presentations: Vec<String>,
}
