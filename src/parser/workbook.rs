//! Workbook Loader
//!
//! calamineを使用して、ワークブックの最初のシートを`Table`として読み込む。
//! 数式は評価せず、ファイルに保存されたキャッシュ値をそのまま使用します。

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;

use crate::builder::ConversionConfig;
use crate::error::CleanCsvError;
use crate::formatter::CellFormatter;
use crate::types::{CellValue, Table};

/// ワークブックローダー
///
/// calamineの`Sheets`のラッパーとして、最初のシートの読み込みを提供します。
/// 形式（xlsx, xlsm, xlsb, xls, ods）の判定はcalamineに委ねます。
pub(crate) struct WorkbookLoader<RS> {
    sheets: Sheets<RS>,
}

impl WorkbookLoader<BufReader<File>> {
    /// パスからワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookLoader)` - ワークブックを開けた場合
    /// * `Err(CleanCsvError::InputNotFound)` - パスに何も存在しない場合（読み込みは試行しない）
    /// * `Err(CleanCsvError::LoadFailed)` - ワークブックとして開けない場合
    pub fn open(path: &Path) -> Result<Self, CleanCsvError> {
        if !path.exists() {
            return Err(CleanCsvError::InputNotFound(path.to_path_buf()));
        }

        let sheets = open_workbook_auto(path)?;
        debug!(path = %path.display(), "opened workbook");
        Ok(Self { sheets })
    }
}

impl WorkbookLoader<Cursor<Vec<u8>>> {
    /// リーダーからワークブックを開く
    ///
    /// 入力全体をメモリに読み込んでから解析します。
    /// 読み込み中のI/Oエラーも`LoadFailed`として扱います。
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, CleanCsvError> {
        let mut buffer = Vec::new();
        reader
            .read_to_end(&mut buffer)
            .map_err(calamine::Error::Io)?;

        let sheets = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { sheets })
    }
}

impl<RS: Read + Seek> WorkbookLoader<RS> {
    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    /// 最初のシート（インデックス0）を`Table`として読み込む
    ///
    /// シートの1行目をヘッダー行、2行目以降をデータ行とします。
    /// シートが1枚もない場合は`LoadFailed`を返します。
    pub fn load_first_sheet(
        &mut self,
        formatter: &CellFormatter,
        config: &ConversionConfig,
    ) -> Result<Table, CleanCsvError> {
        let range = self
            .sheets
            .worksheet_range_at(0)
            .ok_or(CleanCsvError::LoadFailed(calamine::Error::Msg(
                "Workbook contains no sheets",
            )))??;

        let table = range_to_table(&range, formatter, config);
        debug!(
            rows = table.height(),
            cols = table.width(),
            "loaded first sheet"
        );
        Ok(table)
    }
}

/// calamineの`Range`を絶対座標（A1起点）の`Table`に変換
///
/// `Range`は使用中のセル範囲だけを保持するため、先頭の空列・空行の
/// 分だけ開始位置がずれます。ここでは`get_value`で絶対座標を引き、
/// 範囲外のセルは`Missing`として扱います。
fn range_to_table(
    range: &Range<Data>,
    formatter: &CellFormatter,
    config: &ConversionConfig,
) -> Table {
    let Some((end_row, end_col)) = range.end() else {
        return Table::default();
    };

    let cell = |row: u32, col: u32| match range.get_value((row, col)) {
        Some(data) => formatter.format_cell(data, config),
        None => CellValue::Missing,
    };

    let header = (0..=end_col).map(|col| cell(0, col)).collect();
    let rows = (1..=end_row)
        .map(|row| (0..=end_col).map(|col| cell(row, col)).collect())
        .collect();

    Table::new(header, rows)
}
