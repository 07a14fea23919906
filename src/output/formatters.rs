//! Output Formatters Implementation
//!
//! CSV出力フォーマッターの実装を提供するモジュール。

use std::io::Write;

use crate::error::CleanCsvError;
use crate::pipeline::header_labels;
use crate::types::Table;

/// CSV形式のフォーマッター
///
/// 区切り文字はカンマ、改行は`\n`。カンマ・ダブルクォート・改行を含む
/// フィールドはダブルクォートで囲み、内部のダブルクォートは2つにエスケープします
/// （`csv`クレートの`QuoteStyle::Necessary`）。
#[derive(Debug, Default)]
pub(crate) struct CsvFormatter;

impl CsvFormatter {
    /// 表をCSVとして出力する
    ///
    /// ヘッダー行の後に各データ行を書き出します。
    /// 列が1つもない場合は何も書き出しません。
    pub fn render<W: Write>(&self, table: &Table, writer: W) -> Result<(), CleanCsvError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(b',')
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        if table.width() == 0 {
            csv_writer.flush()?;
            return Ok(());
        }

        csv_writer.write_record(header_labels(table))?;
        for row in &table.rows {
            csv_writer.write_record(row.iter().map(|cell| cell.to_string()))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
