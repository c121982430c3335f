//! Aggregation Module
//!
//! レコードの抽出と並行して、製造業者ルックアップと剤形一覧を構築するモジュール。

use indexmap::IndexMap;
use std::collections::HashSet;

use crate::normalize::fold_accents;
use crate::schema::Column;
use crate::types::{CellValue, Record};

/// 製造業者ルックアップと剤形一覧の集計器
///
/// 1回の変換ごとに新しく生成され、レコードを受け取るたびに更新されます。
/// 要素の削除は行いません。
#[derive(Debug, Default)]
pub(crate) struct Aggregator {
    /// CNPJ → 製造業者名（最初に出現した値を保持）
    laboratories: IndexMap<String, Option<String>>,

    /// 剤形一覧（出現順）
    presentations: Vec<String>,

    /// `presentations`の重複判定用（アクセント除去 + 小文字化したキー）
    seen_presentations: HashSet<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// レコード1件分を集計に反映する
    pub fn add(&mut self, record: &Record) {
        if let Some(cnpj) = non_null_text(record.get(Column::Cnpj)) {
            if !self.laboratories.contains_key(cnpj) {
                // 製造業者名が空の場合はnullのまま登録され、後続の行でも更新されない
                let name = record.get(Column::Laboratorio).as_text().map(str::to_string);
                self.laboratories.insert(cnpj.to_string(), name);
            }
        }

        if let Some(presentation) = non_null_text(record.get(Column::Apresentacao)) {
            let folded = fold_accents(presentation);
            // 大文字・小文字の違いも同一視する（表記ゆれを1件にまとめる）
            if self.seen_presentations.insert(folded.to_lowercase()) {
                self.presentations.push(folded);
            }
        }
    }

    /// 集計結果を取り出す
    pub fn finish(self) -> (IndexMap<String, Option<String>>, Vec<String>) {
        (self.laboratories, self.presentations)
    }
}

/// テキスト列の非null値を文字列として取得
///
/// CNPJ・剤形列はテキスト列なので、非null値は常に`Text`になります。
fn non_null_text(value: &CellValue) -> Option<&str> {
    match value {
        CellValue::Text(s) => Some(s),
        _ => None,
    }
}
