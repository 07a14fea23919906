//! Parser Module
//!
//! calamineを使用したワークブック読み込みの実装。

mod workbook;

pub(crate) use workbook::WorkbookLoader;
