//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use std::fmt;

/// セルの値を表す列挙型
///
/// 読み込み直後は`Missing`を含み得ますが、欠損値の正規化後は
/// `Missing`は`Text("")`に置き換えられます。
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellValue {
    /// 欠損セル（シート上に値がない）
    Missing,

    /// 文字列
    Text(String),

    /// 整数
    Integer(i64),

    /// 浮動小数点数
    Float(f64),
}

impl CellValue {
    /// 前後の空白を除いた文字列表現が空かどうかを判定
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Integer(_) | CellValue::Float(_) => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(n) => write!(f, "{}", n),
        }
    }
}

/// シートから読み込んだ表
///
/// 座標はシートのA1を起点とする絶対位置で保持します。
/// 先頭の空行・空列があっても列位置はずれません。
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct Table {
    /// 列ラベルの元になる行（シートの1行目）
    pub header: Vec<CellValue>,

    /// 各列のシート上の列インデックス（0始まり）
    pub source_columns: Vec<usize>,

    /// データ行（シートの2行目以降）
    ///
    /// すべての行は`source_columns`と同じ長さに揃えられています。
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// ヘッダー行とデータ行から表を生成
    ///
    /// 短い行は`Missing`で埋めて、最も長い行の幅に揃えます。
    pub fn new(header: Vec<CellValue>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0);

        let pad = |mut row: Vec<CellValue>| {
            row.resize(width, CellValue::Missing);
            row
        };

        Self {
            header: pad(header),
            source_columns: (0..width).collect(),
            rows: rows.into_iter().map(pad).collect(),
        }
    }

    /// 列数
    pub fn width(&self) -> usize {
        self.source_columns.len()
    }

    /// データ行数
    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_is_blank() {
        assert!(CellValue::Missing.is_blank());
        assert!(text("").is_blank());
        assert!(text("   \t").is_blank());
        assert!(!text(" x ").is_blank());
        assert!(!CellValue::Integer(0).is_blank());
        assert!(!CellValue::Float(0.5).is_blank());
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Missing.to_string(), "");
        assert_eq!(text("abc").to_string(), "abc");
        assert_eq!(CellValue::Integer(-5).to_string(), "-5");
        assert_eq!(CellValue::Float(12.5).to_string(), "12.5");
        assert_eq!(CellValue::Float(0.1 + 0.2).to_string(), "0.30000000000000004");
    }

    #[test]
    fn test_display_float_never_uses_exponent() {
        assert_eq!(CellValue::Float(1e-7).to_string(), "0.0000001");
        assert_eq!(CellValue::Float(-2.5e-5).to_string(), "-0.000025");

        let large = CellValue::Float(1.5e300).to_string();
        assert_eq!(large.len(), 301);
        assert!(large.starts_with("15"));
        assert!(large[2..].bytes().all(|b| b == b'0'));
    }

    #[test]
    fn test_table_pads_rows_to_widest() {
        let table = Table::new(
            vec![text("A"), text("B")],
            vec![vec![text("1")], vec![text("1"), text("2"), text("3")]],
        );

        assert_eq!(table.width(), 3);
        assert_eq!(table.height(), 2);
        assert_eq!(table.header[2], CellValue::Missing);
        assert_eq!(table.rows[0][1], CellValue::Missing);
        assert_eq!(table.source_columns, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(Vec::new(), Vec::new());
        assert_eq!(table.width(), 0);
        assert_eq!(table.height(), 0);
    }
}
