//! Cleaning Pipeline Module
//!
//! 読み込んだ`Table`に対して、列選択・欠損値の置換・空行の削除・
//! 整数値の正規化を順に適用するモジュール。
//! 各段階は前段の結果を受け取り、表をその場で書き換えます。

use std::collections::HashSet;
use std::ops::Range;

use crate::types::{CellValue, Table};

/// 抽出する列の範囲（0始まり、B列からH列まで）
pub(crate) const SELECTED_COLUMNS: Range<usize> = 1..8;

/// パイプライン全段の実行結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CleanStats {
    /// 選択後の列数
    pub columns: usize,
    /// 削除された空行の数
    pub dropped_rows: usize,
    /// 残った行の数
    pub kept_rows: usize,
}

/// すべての段階を順に適用する
pub(crate) fn clean(table: &mut Table) -> CleanStats {
    select_columns(table);
    fill_missing(table);
    let dropped_rows = drop_empty_rows(table);
    coerce_integral(table);

    CleanStats {
        columns: table.width(),
        dropped_rows,
        kept_rows: table.height(),
    }
}

/// B列〜H列だけを残す
///
/// 列数が足りない場合は存在する分だけを残します。
/// 2列未満のシートでは0列になります。
pub(crate) fn select_columns(table: &mut Table) {
    let start = SELECTED_COLUMNS.start.min(table.width());
    let end = SELECTED_COLUMNS.end.min(table.width());

    let take = |row: &mut Vec<CellValue>| {
        row.truncate(end);
        row.drain(..start);
    };

    take(&mut table.header);
    table.source_columns.truncate(end);
    table.source_columns.drain(..start);
    table.rows.iter_mut().for_each(take);
}

/// 欠損セルを空文字列に置き換える
///
/// ヘッダー行は列ラベルの決定時に欠損を判定するため、ここでは変更しません。
pub(crate) fn fill_missing(table: &mut Table) {
    for cell in table.rows.iter_mut().flatten() {
        if matches!(cell, CellValue::Missing) {
            *cell = CellValue::Text(String::new());
        }
    }
}

/// 選択範囲内のすべてのセルが空白の行を削除する
///
/// 残った行の相対順序は保持されます。
///
/// # 戻り値
///
/// 削除した行数
pub(crate) fn drop_empty_rows(table: &mut Table) -> usize {
    let before = table.rows.len();
    table
        .rows
        .retain(|row| !row.iter().all(CellValue::is_blank));
    before - table.rows.len()
}

/// 整数値に等しい浮動小数点数を整数表現に置き換える
///
/// `3.0`は`3`に、`-0.0`は`0`になります。小数部を持つ値、文字列、
/// `i64`で表現できない値はそのまま残ります。ヘッダー行にも適用します。
pub(crate) fn coerce_integral(table: &mut Table) {
    let cells = table.header.iter_mut().chain(table.rows.iter_mut().flatten());
    for cell in cells {
        if let CellValue::Float(f) = *cell {
            if let Some(i) = integral_value(f) {
                *cell = CellValue::Integer(i);
            }
        }
    }
}

fn integral_value(f: f64) -> Option<i64> {
    // i64::MAX as f64 は 2^63 に丸められるため、上限は排他的に比較する
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

/// 出力CSVの列ラベルを決定する
///
/// - シート1行目の値をラベルとして使用
/// - 欠損または空文字列のラベルは`Unnamed: <列インデックス>`（空白のみのラベルはそのまま）
/// - 重複したラベルには左から順に`.1`, `.2`, ...を付与
pub(crate) fn header_labels(table: &Table) -> Vec<String> {
    let raw: Vec<String> = table
        .header
        .iter()
        .zip(&table.source_columns)
        .map(|(cell, col)| match cell {
            CellValue::Missing => format!("Unnamed: {}", col),
            CellValue::Text(s) if s.is_empty() => format!("Unnamed: {}", col),
            _ => cell.to_string(),
        })
        .collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut labels = Vec::with_capacity(raw.len());
    for label in &raw {
        let mut candidate = label.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) || (candidate != *label && raw.contains(&candidate)) {
            candidate = format!("{}.{}", label, suffix);
            suffix += 1;
        }
        seen.insert(candidate.clone());
        labels.push(candidate);
    }
    labels
}
