//! Text Normalizer Module
//!
//! アクセント記号（結合文字）を取り除くテキスト正規化を提供するモジュール。
//! 剤形（APRESENTAÇÃO）の重複排除に使用します。

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// 文字列からアクセント記号を取り除く
///
/// 正準分解（NFD）した後に結合文字を除去し、正準合成（NFC）で再合成します。
/// 例: `"com revéstimento"` → `"com revestimento"`
///
/// 冪等であり、アクセント記号を含まない文字列はそのまま返されます。
pub fn fold_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}
