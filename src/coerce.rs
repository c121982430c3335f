//! Cell Value Coercer Module
//!
//! 生のセル文字列を、列の分類に応じて型付きの値に変換するモジュール。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::{classify, ColumnClass};
use crate::types::CellValue;

/// 価格セルの値パターン（小数点は`,`または`.`、末尾に任意の`*`）
static DECIMAL_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+[.,][0-9]+\*?$").expect("decimal value pattern is valid")
});

/// セル値を列に応じて型変換する
///
/// # 引数
///
/// * `raw` - 生のセル値（`None`はセルが存在しないことを表す）
/// * `column_name` - セルが属する列名
///
/// # 変換規則（上から順に評価）
///
/// 1. 物質名列でセルが存在しない → 空文字列
/// 2. セルが存在しない → 空文字列として以降の規則を適用
/// 3. トリム後が`"-"`または空 → `Null`（物質名列の空文字列は空文字列のまま）
/// 4. 価格列で小数パターンに一致 → `Number`（最初の`,`を`.`に置換し、`*`を1つ除去）
/// 5. 論理値列 → 大文字小文字を無視して`"sim"`なら`true`、それ以外は`false`
/// 6. それ以外 → トリムした文字列
///
/// # 注意
///
/// 価格の末尾の`*`（注記付き価格の印）は除去され、出力には残りません。
/// 元データの情報が一部失われる変換です。
///
/// 価格列に数値として解釈できない値が入っている場合はエラーにせず、
/// 文字列としてそのまま出力します。
pub fn coerce(raw: Option<&str>, column_name: &str) -> CellValue {
    let class = classify(column_name);

    let value = match raw {
        Some(value) => value.trim(),
        None if class == ColumnClass::Substance => return CellValue::Text(String::new()),
        None => "",
    };

    if value == "-" {
        return CellValue::Null;
    }
    if value.is_empty() {
        return match class {
            ColumnClass::Substance => CellValue::Text(String::new()),
            _ => CellValue::Null,
        };
    }

    match class {
        ColumnClass::Currency if DECIMAL_VALUE.is_match(value) => {
            match parse_decimal(value) {
                Some(number) => CellValue::Number(number),
                None => CellValue::Text(value.to_string()),
            }
        }
        ColumnClass::Boolean => CellValue::Bool(value.to_lowercase() == "sim"),
        _ => CellValue::Text(value.to_string()),
    }
}

/// ロケール形式の小数を解析する（例: `"12,34*"` → `12.34`）
fn parse_decimal(value: &str) -> Option<f64> {
    let normalized = value.replacen(',', ".", 1).replacen('*', "", 1);
    normalized.parse::<f64>().ok()
}
