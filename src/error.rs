//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::path::PathBuf;
use thiserror::Error;

/// cleancsvクレート全体で使用するエラー型
///
/// 変換パイプラインの各段階で発生し得る失敗を表します。
/// いずれのエラーも内部でリトライ・回復されることはなく、
/// CLIでは非ゼロの終了ステータスとして呼び出し元に通知されます。
///
/// # エラーの種類
///
/// - `InputNotFound`: 入力パスに何も存在しない（読み込み前に検出）
/// - `LoadFailed`: ワークブックの読み込みに失敗した（calamine由来）
/// - `WriteFailed`: CSVの書き込みに失敗した
/// - `Config`: ビルダー設定の検証に失敗した
///
/// # 使用例
///
/// ```rust,no_run
/// use cleancsv::{CleanCsvError, ConverterBuilder};
///
/// # fn main() -> Result<(), CleanCsvError> {
/// let converter = ConverterBuilder::new().build()?;
/// match converter.convert("missing.xlsx") {
///     Err(CleanCsvError::InputNotFound(path)) => {
///         eprintln!("Error: File '{}' not found.", path.display());
///     }
///     Err(e) => eprintln!("{}", e),
///     Ok(output) => println!("{}", output.display()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Error, Debug)]
pub enum CleanCsvError {
    /// 入力パスにファイルが存在しない
    ///
    /// 存在確認はワークブックの読み込みより前に行われるため、
    /// このエラーの場合は出力ファイルも作成されません。
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// ワークブックの読み込みに失敗したエラー
    ///
    /// 破損したファイル、サポートされていない形式、シートが存在しない
    /// ワークブックなどが原因となります。
    ///
    /// `#[from]`属性により、`calamine::Error`から自動的に変換されます。
    #[error("Failed to load workbook: {0}")]
    LoadFailed(#[from] calamine::Error),

    /// CSV出力の書き込みに失敗したエラー
    ///
    /// 書き込み権限がない、ディスクが一杯などが原因となります。
    /// `csv::Error`は`std::io::Error`を経由して変換されます。
    #[error("Failed to write CSV output: {0}")]
    WriteFailed(#[from] std::io::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<csv::Error> for CleanCsvError {
    fn from(err: csv::Error) -> Self {
        CleanCsvError::WriteFailed(err.into())
    }
}
