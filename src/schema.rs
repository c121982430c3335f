//! Column Schema Module
//!
//! CMED価格表の固定73列スキーマと、列名から列分類へのルックアップテーブルを定義するモジュール。
//!
//! 列分類（通貨・論理値・物質名・テキスト）は起動時に一度だけ構築されるテーブルで管理され、
//! セル値の変換処理はこのテーブルを参照します。

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// 列の分類
///
/// セル値の型変換規則を決定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnClass {
    /// 先頭列（有効成分）。欠損値は空文字列になる
    Substance,
    /// 価格列（PF / PMVG）。ロケール形式の小数として解析される
    Currency,
    /// 「Sim」/「Não」の論理値列
    Boolean,
    /// その他の列。トリムされた文字列として出力される
    Text,
}

macro_rules! columns {
    ($($variant:ident => $name:literal,)+) => {
        /// CMED価格表の列
        ///
        /// 宣言順がスプレッドシート上の列順と一致します。
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Column {
            $($variant,)+
        }

        impl Column {
            /// スキーマ順のすべての列
            pub const ALL: [Column; COLUMN_COUNT] = [$(Column::$variant,)+];

            /// スプレッドシート上の列名
            pub const fn name(self) -> &'static str {
                match self {
                    $(Column::$variant => $name,)+
                }
            }
        }
    };
}

/// スキーマの列数
pub const COLUMN_COUNT: usize = 73;

columns! {
    Substancia => "SUBSTÂNCIA",
    Cnpj => "CNPJ",
    Laboratorio => "LABORATÓRIO",
    CodigoGgrem => "CÓDIGO GGREM",
    Registro => "REGISTRO",
    Ean1 => "EAN 1",
    Ean2 => "EAN 2",
    Ean3 => "EAN 3",
    Produto => "PRODUTO",
    Apresentacao => "APRESENTAÇÃO",
    ClasseTerapeutica => "CLASSE TERAPÊUTICA",
    TipoProduto => "TIPO DE PRODUTO (STATUS DO PRODUTO)",
    RegimePreco => "REGIME DE PREÇO",
    PfSemImpostos => "PF Sem Impostos",
    Pf0 => "PF 0%",
    Pf12 => "PF 12%",
    Pf12Alc => "PF 12% ALC",
    Pf17 => "PF 17%",
    Pf17Alc => "PF 17% ALC",
    Pf175 => "PF 17,5%",
    Pf175Alc => "PF 17,5% ALC",
    Pf18 => "PF 18%",
    Pf18Alc => "PF 18% ALC",
    Pf19 => "PF 19%",
    Pf19Alc => "PF 19% ALC",
    Pf195 => "PF 19,5%",
    Pf195Alc => "PF 19,5% ALC",
    Pf20 => "PF 20%",
    Pf20Alc => "PF 20% ALC",
    Pf205 => "PF 20,5%",
    Pf205Alc => "PF 20,5% ALC",
    Pf21 => "PF 21%",
    Pf21Alc => "PF 21% ALC",
    Pf22 => "PF 22%",
    Pf22Alc => "PF 22% ALC",
    Pf225 => "PF 22,5%",
    Pf225Alc => "PF 22,5% ALC",
    Pf23 => "PF 23%",
    Pf23Alc => "PF 23% ALC",
    PmvgSemImpostos => "PMVG Sem Impostos",
    Pmvg0 => "PMVG 0%",
    Pmvg12 => "PMVG 12%",
    Pmvg12Alc => "PMVG 12% ALC",
    Pmvg17 => "PMVG 17%",
    Pmvg17Alc => "PMVG 17% ALC",
    Pmvg175 => "PMVG 17,5%",
    Pmvg175Alc => "PMVG 17,5% ALC",
    Pmvg18 => "PMVG 18%",
    Pmvg18Alc => "PMVG 18% ALC",
    Pmvg19 => "PMVG 19%",
    Pmvg19Alc => "PMVG 19% ALC",
    Pmvg195 => "PMVG 19,5%",
    Pmvg195Alc => "PMVG 19,5% ALC",
    Pmvg20 => "PMVG 20%",
    Pmvg20Alc => "PMVG 20% ALC",
    Pmvg205 => "PMVG 20,5%",
    Pmvg205Alc => "PMVG 20,5% ALC",
    Pmvg21 => "PMVG 21%",
    Pmvg21Alc => "PMVG 21% ALC",
    Pmvg22 => "PMVG 22%",
    Pmvg22Alc => "PMVG 22% ALC",
    Pmvg225 => "PMVG 22,5%",
    Pmvg225Alc => "PMVG 22,5% ALC",
    Pmvg23 => "PMVG 23%",
    Pmvg23Alc => "PMVG 23% ALC",
    RestricaoHospitalar => "RESTRIÇÃO HOSPITALAR",
    Cap => "CAP",
    Confaz87 => "CONFAZ 87",
    Icms0 => "ICMS 0%",
    AnaliseRecursal => "ANÁLISE RECURSAL",
    ListaConcessaoCreditoTributario => "LISTA DE CONCESSÃO DE CRÉDITO TRIBUTÁRIO (PIS/COFINS)",
    Comercializacao2024 => "COMERCIALIZAÇÃO 2024",
    Tarja => "TARJA",
}

/// 論理値列の固定セット
const BOOLEAN_COLUMNS: [Column; 5] = [
    Column::RestricaoHospitalar,
    Column::Cap,
    Column::Confaz87,
    Column::Icms0,
    Column::Comercializacao2024,
];

/// 価格列の列名パターン
static CURRENCY_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(PF |PMVG )([0-2]|S)").expect("currency header pattern is valid")
});

/// 列名 → 列分類のルックアップテーブル（スキーマ内の73列分）
static CLASS_TABLE: Lazy<HashMap<&'static str, ColumnClass>> = Lazy::new(|| {
    Column::ALL
        .iter()
        .map(|column| (column.name(), classify_by_rules(column.name())))
        .collect()
});

impl Column {
    /// スキーマ上の位置（0始まり）
    pub fn index(self) -> usize {
        self as usize
    }

    /// 位置から列を取得する
    pub fn from_index(index: usize) -> Option<Column> {
        Column::ALL.get(index).copied()
    }

    /// 列名から列を取得する（完全一致）
    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.iter().copied().find(|column| column.name() == name)
    }

    /// 列の分類
    pub fn class(self) -> ColumnClass {
        classify(self.name())
    }
}

/// 列名を分類する
///
/// スキーマ内の列名はテーブルから引き、スキーマ外の列名は同じ規則で都度判定します
/// （スキーマ外の列は実質的にすべて`Text`になります）。
pub fn classify(column_name: &str) -> ColumnClass {
    CLASS_TABLE
        .get(column_name)
        .copied()
        .unwrap_or_else(|| classify_by_rules(column_name))
}

/// 分類規則（テーブル構築時にのみ使用）
fn classify_by_rules(column_name: &str) -> ColumnClass {
    if column_name == Column::Substancia.name() {
        ColumnClass::Substance
    } else if CURRENCY_HEADER.is_match(column_name) {
        ColumnClass::Currency
    } else if BOOLEAN_COLUMNS.iter().any(|c| c.name() == column_name) {
        ColumnClass::Boolean
    } else {
        ColumnClass::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_schema_has_73_distinct_names() {
        let names: HashSet<&str> = Column::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), COLUMN_COUNT);
        assert_eq!(CLASS_TABLE.len(), COLUMN_COUNT);
    }

    #[test]
    fn test_index_matches_declaration_order() {
        for (i, column) in Column::ALL.iter().enumerate() {
            assert_eq!(column.index(), i);
            assert_eq!(Column::from_index(i), Some(*column));
        }
        assert_eq!(Column::from_index(COLUMN_COUNT), None);
        assert_eq!(Column::Substancia.index(), 0);
        assert_eq!(Column::Tarja.index(), 72);
    }

    #[test]
    fn test_class_counts() {
        let count = |class: ColumnClass| Column::ALL.iter().filter(|c| c.class() == class).count();

        assert_eq!(count(ColumnClass::Substance), 1);
        // PF 26列 + PMVG 26列
        assert_eq!(count(ColumnClass::Currency), 52);
        assert_eq!(count(ColumnClass::Boolean), 5);
        assert_eq!(count(ColumnClass::Text), 15);
    }

    #[test]
    fn test_classify_known_columns() {
        assert_eq!(classify("SUBSTÂNCIA"), ColumnClass::Substance);
        assert_eq!(classify("PF Sem Impostos"), ColumnClass::Currency);
        assert_eq!(classify("PMVG 0%"), ColumnClass::Currency);
        assert_eq!(classify("PF 18% ALC"), ColumnClass::Currency);
        assert_eq!(classify("PMVG 22,5%"), ColumnClass::Currency);
        assert_eq!(classify("CAP"), ColumnClass::Boolean);
        assert_eq!(classify("RESTRIÇÃO HOSPITALAR"), ColumnClass::Boolean);
        assert_eq!(classify("ANÁLISE RECURSAL"), ColumnClass::Text);
        assert_eq!(classify("TARJA"), ColumnClass::Text);
    }

    #[test]
    fn test_classify_unknown_columns() {
        assert_eq!(classify("QUALQUER_OUTRA_COLUNA"), ColumnClass::Text);
        // スキーマ外でも価格列パターンに一致すれば通貨列
        assert_eq!(classify("PF 24%"), ColumnClass::Currency);
        assert_eq!(classify("PF 3%"), ColumnClass::Text);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Column::from_name("CNPJ"), Some(Column::Cnpj));
        assert_eq!(
            Column::from_name("COMERCIALIZAÇÃO 2024"),
            Some(Column::Comercializacao2024)
        );
        assert_eq!(Column::from_name("cnpj"), None);
    }
}
