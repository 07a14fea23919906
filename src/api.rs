//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 日付の出力形式
///
/// Excelの日付・時刻セルをCSVに書き出す際の文字列形式を指定します。
/// 日付セルは読み込み時に文字列へ変換されるため、数値の正規化の対象にはなりません。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DateFormat {
    /// ISO 8601風の日時形式（`YYYY-MM-DD HH:MM:SS`、デフォルト）
    ///
    /// 例: `2025-11-20 00:00:00`
    #[default]
    IsoDateTime,

    /// ISO 8601形式の日付のみ（`YYYY-MM-DD`）
    ///
    /// 時刻部分は切り捨てられます。
    IsoDate,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use cleancsv::{ConverterBuilder, DateFormat};
    ///
    /// # fn main() -> Result<(), cleancsv::CleanCsvError> {
    /// let converter = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%d/%m/%Y".to_string()))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Custom(String),
}

impl DateFormat {
    /// chrono互換のフォーマット文字列を取得
    pub(crate) fn pattern(&self) -> &str {
        match self {
            DateFormat::IsoDateTime => "%Y-%m-%d %H:%M:%S",
            DateFormat::IsoDate => "%Y-%m-%d",
            DateFormat::Custom(format_str) => format_str,
        }
    }
}
