//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use crate::api::DateFormat;
use crate::error::CleanCsvError;
use crate::formatter::CellFormatter;
use crate::output::CsvFormatter;
use crate::parser::WorkbookLoader;
use crate::pipeline::{self, CleanStats};
use crate::types::Table;
use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 出力ファイルの拡張子
const OUTPUT_EXTENSION: &str = "csv";

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone, Default)]
pub(crate) struct ConversionConfig {
    /// 出力ディレクトリ（Noneの場合は変換時のカレントディレクトリ）
    pub output_dir: Option<PathBuf>,

    /// 日付形式
    pub date_format: DateFormat,
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use cleancsv::{ConverterBuilder, DateFormat};
///
/// # fn main() -> Result<(), cleancsv::CleanCsvError> {
/// let converter = ConverterBuilder::new()
///     .with_date_format(DateFormat::IsoDate)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 出力先: 変換時のカレントディレクトリ
    /// - 日付形式: `YYYY-MM-DD HH:MM:SS`
    pub fn new() -> Self {
        Self::default()
    }

    /// 出力ディレクトリを指定する
    ///
    /// 指定しない場合、CSVは変換時のカレントディレクトリに書き出されます
    /// （入力ファイルのディレクトリではありません）。
    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    /// 日付の出力形式を指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use cleancsv::{ConverterBuilder, DateFormat};
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y/%m/%d".to_string()));
    /// ```
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `CleanCsvError::Config(String)`: カスタム日付形式が空、または不正な書式文字列
    pub fn build(self) -> Result<Converter, CleanCsvError> {
        if let DateFormat::Custom(ref format_str) = self.config.date_format {
            validate_date_format(format_str)?;
        }

        Ok(Converter::new(self.config))
    }
}

fn validate_date_format(format_str: &str) -> Result<(), CleanCsvError> {
    use chrono::format::{Item, StrftimeItems};
    use std::fmt::Write as _;

    let invalid = || CleanCsvError::Config(format!("Invalid date format string: '{}'", format_str));

    if format_str.is_empty() {
        return Err(invalid());
    }
    if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    // テスト用の日時でフォーマット試行（タイムゾーン指定子などはここで失敗する）
    let test_datetime = NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| CleanCsvError::Config("Failed to create test date".to_string()))?;
    let mut formatted = String::new();
    if write!(formatted, "{}", test_datetime.format(format_str)).is_err() || formatted.is_empty() {
        return Err(invalid());
    }
    Ok(())
}

/// 変換処理のファサード
///
/// ワークブックの最初のシートをクリーニング済みCSVに変換するメインエントリーポイントです。
///
/// # 処理フロー
///
/// 1. 入力パスの存在確認
/// 2. 最初のシートの読み込み
/// 3. B〜H列の選択
/// 4. 欠損値を空文字列に置換
/// 5. 空行の削除
/// 6. 整数値に等しい小数の整数化
/// 7. CSVの書き出し
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// セルフォーマッター
    formatter: CellFormatter,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            formatter: CellFormatter::new(),
            config,
        }
    }

    /// ワークブックを変換し、出力先ディレクトリに`<入力ファイル名>.csv`を書き出す
    ///
    /// 既存のファイルは警告なしに上書きされます。
    /// ワークブックの読み込みが完了するまで出力ファイルは作成されません。
    ///
    /// # 戻り値
    ///
    /// * `Ok(PathBuf)` - 書き出したCSVのパス
    /// * `Err(CleanCsvError)` - 入力が存在しない、読み込み・書き込みに失敗した場合
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use cleancsv::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), cleancsv::CleanCsvError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// // カレントディレクトリに report.csv が作成される
    /// let output = converter.convert("/tmp/report.xlsx")?;
    /// println!("{}", output.display());
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert<P: AsRef<Path>>(&self, input_path: P) -> Result<PathBuf, CleanCsvError> {
        let input_path = input_path.as_ref();

        let table = {
            let mut loader = WorkbookLoader::open(input_path)?;
            debug!(sheets = ?loader.sheet_names(), "reading first sheet");
            self.load_and_clean(&mut loader)?
        };

        let output_path = self.output_path(input_path)?;
        let file = File::create(&output_path).map_err(|e| with_path(e, &output_path))?;
        CsvFormatter.render(&table, BufWriter::new(file))?;

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            rows = table.height(),
            "wrote clean CSV"
        );
        Ok(output_path)
    }

    /// リーダーから読み込んだワークブックを変換し、CSVをライターに書き出す
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use cleancsv::ConverterBuilder;
    /// use std::io::Cursor;
    ///
    /// # fn main() -> Result<(), cleancsv::CleanCsvError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let excel_data: Vec<u8> = vec![]; // Excelファイルのバイト列
    /// let mut csv_output = Vec::new();
    /// converter.convert_reader(Cursor::new(excel_data), &mut csv_output)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_reader<R: Read, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<(), CleanCsvError> {
        let mut loader = WorkbookLoader::from_reader(input)?;
        let table = self.load_and_clean(&mut loader)?;
        CsvFormatter.render(&table, output)
    }

    /// リーダーから読み込んだワークブックを変換し、CSVを文字列として返す
    pub fn convert_to_string<R: Read>(&self, input: R) -> Result<String, CleanCsvError> {
        let mut output = Vec::new();
        self.convert_reader(input, &mut output)?;

        String::from_utf8(output).map_err(|e| {
            CleanCsvError::WriteFailed(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    fn load_and_clean<RS: Read + Seek>(
        &self,
        loader: &mut WorkbookLoader<RS>,
    ) -> Result<Table, CleanCsvError> {
        let mut table = loader.load_first_sheet(&self.formatter, &self.config)?;
        let CleanStats {
            columns,
            dropped_rows,
            kept_rows,
        } = pipeline::clean(&mut table);

        if columns == 0 {
            warn!("first sheet has no cells in columns B-H; output will be empty");
        }
        debug!(columns, dropped_rows, kept_rows, "cleaned table");
        Ok(table)
    }

    /// 出力パス`<出力ディレクトリ>/<入力ファイル名から拡張子を除いたもの>.csv`を求める
    fn output_path(&self, input_path: &Path) -> Result<PathBuf, CleanCsvError> {
        let stem = input_path.file_stem().ok_or_else(|| {
            CleanCsvError::Config(format!(
                "Cannot derive output file name from '{}'",
                input_path.display()
            ))
        })?;

        let dir = match &self.config.output_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        let mut file_name = stem.to_os_string();
        file_name.push(".");
        file_name.push(OUTPUT_EXTENSION);
        Ok(dir.join(file_name))
    }
}

fn with_path(err: std::io::Error, path: &Path) -> std::io::Error {
    std::io::Error::new(err.kind(), format!("{}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = ConverterBuilder::new();
        assert_eq!(builder.config.output_dir, None);
        assert_eq!(builder.config.date_format, DateFormat::IsoDateTime);
    }

    #[test]
    fn test_builder_with_settings() {
        let builder = ConverterBuilder::new()
            .with_output_dir("/tmp/out")
            .with_date_format(DateFormat::IsoDate);

        assert_eq!(builder.config.output_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(builder.config.date_format, DateFormat::IsoDate);
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_build_rejects_empty_custom_date_format() {
        let result = ConverterBuilder::new()
            .with_date_format(DateFormat::Custom(String::new()))
            .build();

        match result {
            Err(CleanCsvError::Config(msg)) => assert!(msg.contains("Invalid date format")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_build_rejects_invalid_custom_date_format() {
        let result = ConverterBuilder::new()
            .with_date_format(DateFormat::Custom("%Y-%Q".to_string()))
            .build();

        assert!(matches!(result, Err(CleanCsvError::Config(_))));
    }

    #[test]
    fn test_build_rejects_timezone_specifier() {
        let result = ConverterBuilder::new()
            .with_date_format(DateFormat::Custom("%Y-%m-%d %z".to_string()))
            .build();

        assert!(matches!(result, Err(CleanCsvError::Config(_))));
    }

    #[test]
    fn test_build_accepts_custom_date_format() {
        let result = ConverterBuilder::new()
            .with_date_format(DateFormat::Custom("%d.%m.%Y".to_string()))
            .build();

        assert!(result.is_ok());
    }

    #[test]
    fn test_output_path_uses_configured_dir_and_stem() {
        let converter = ConverterBuilder::new()
            .with_output_dir("/home/user")
            .build()
            .unwrap();

        assert_eq!(
            converter.output_path(Path::new("/tmp/report.xlsx")).unwrap(),
            PathBuf::from("/home/user/report.csv")
        );
        assert_eq!(
            converter.output_path(Path::new("data/q1.backup.xlsx")).unwrap(),
            PathBuf::from("/home/user/q1.backup.csv")
        );
        assert_eq!(
            converter.output_path(Path::new("noext")).unwrap(),
            PathBuf::from("/home/user/noext.csv")
        );
    }

    #[test]
    fn test_output_path_defaults_to_current_dir() {
        let converter = ConverterBuilder::new().build().unwrap();
        let expected = std::env::current_dir().unwrap().join("report.csv");

        assert_eq!(
            converter.output_path(Path::new("/tmp/report.xlsx")).unwrap(),
            expected
        );
    }

    #[test]
    fn test_convert_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let converter = ConverterBuilder::new()
            .with_output_dir(dir.path())
            .build()
            .unwrap();

        let result = converter.convert(dir.path().join("missing.xlsx"));

        assert!(matches!(result, Err(CleanCsvError::InputNotFound(_))));
        assert!(!dir.path().join("missing.csv").exists());
    }
}
