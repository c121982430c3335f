//! Security Module
//!
//! 入出力に関するセキュリティ制限を実装するモジュール。
//! 巨大な入力ファイルの読み込みと、不正なアーカイブエントリ名の書き込みを防ぎます。

/// セキュリティ設定
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 512MB (536_870_912 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 536_870_912, // 512MB
        }
    }
}

/// ZIPエントリ名の検証
///
/// 展開時にパストラバーサルを起こすエントリ名を書き込まないよう検証します。
///
/// # 引数
///
/// * `name` - 検証するエントリ名
///
/// # 戻り値
///
/// * `Ok(())` - エントリ名が安全な場合
/// * `Err(String)` - エントリ名が危険な場合（絶対パス、パス区切り、`.`/`..`）
pub(crate) fn validate_entry_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Empty entry name is not allowed".to_string());
    }

    // 絶対パスを拒否（Windows形式の`C:`やUnix形式の`/`で始まる名前）
    if name.starts_with('/') || name.chars().nth(1) == Some(':') {
        return Err(format!("Absolute path is not allowed: {}", name));
    }

    // エントリはアーカイブ直下に1つだけ置く
    if name.contains('/') || name.contains('\\') {
        return Err(format!("Path separator in entry name is not allowed: {}", name));
    }

    if name == "." || name == ".." {
        return Err(format!("Path traversal detected: {}", name));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_entry_name_valid() {
        assert!(validate_entry_name("cmed.json").is_ok());
        assert!(validate_entry_name("xls_conformidade_site_20240301.json").is_ok());
        assert!(validate_entry_name("preços de medicamentos.json").is_ok());
        assert!(validate_entry_name("tabela..final.json").is_ok());
    }

    #[test]
    fn test_validate_entry_name_empty() {
        assert!(validate_entry_name("").is_err());
    }

    #[test]
    fn test_validate_entry_name_absolute() {
        assert!(validate_entry_name("/etc/passwd").is_err());
        assert!(validate_entry_name("C:\\cmed.json").is_err());
        assert!(validate_entry_name("c:cmed.json").is_err());
    }

    #[test]
    fn test_validate_entry_name_traversal() {
        assert!(validate_entry_name("../cmed.json").is_err());
        assert!(validate_entry_name("..").is_err());
    }

    #[test]
    fn test_validate_entry_name_separators() {
        assert!(validate_entry_name("dir/cmed.json").is_err());
        assert!(validate_entry_name("dir\\cmed.json").is_err());
    }

    #[test]
    fn test_default_input_limit() {
        assert_eq!(SecurityConfig::default().max_input_file_size, 536_870_912);
    }
}
