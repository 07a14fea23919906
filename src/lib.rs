//! cleancsv - Convert the first sheet of an Excel workbook into a cleaned CSV
//!
//! ワークブックの最初のシートからB〜H列を取り出し、空行を取り除き、
//! `3.0`のような整数値の小数を`3`に正規化したCSVを書き出すクレートです。
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cleancsv::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // カレントディレクトリに report.csv を書き出す
//!     let output = converter.convert("/tmp/report.xlsx")?;
//!     println!("{}", output.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! For in-memory conversion, use `Cursor`:
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use cleancsv::ConverterBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = ConverterBuilder::new().build()?;
//! let excel_data: Vec<u8> = vec![]; // Your Excel file bytes
//! let csv = converter.convert_to_string(Cursor::new(excel_data))?;
//! print!("{}", csv);
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod error;
mod formatter;
mod output;
mod parser;
mod pipeline;
mod types;

// 公開API
pub use api::DateFormat;
pub use builder::{Converter, ConverterBuilder};
pub use error::CleanCsvError;
