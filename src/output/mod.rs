//! Output Format Module
//!
//! クリーニング済みの表をテキスト形式で書き出すモジュール。

mod formatters;

pub(crate) use formatters::CsvFormatter;
