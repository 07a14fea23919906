//! Cell Formatter Module
//!
//! calamineの生データ（`Data`）を`CellValue`に変換するモジュール。
//! 数値は数値のまま保持し、論理値・日付・エラー値は読み込み時点で文字列化する。

use calamine::{Data, ExcelDateTime};
use chrono::{Duration, NaiveTime};

use crate::builder::ConversionConfig;
use crate::types::CellValue;

/// セルフォーマッター
///
/// 生のセル値を、パイプラインが扱う閉じた列挙型`CellValue`に変換します。
#[derive(Debug, Default)]
pub(crate) struct CellFormatter {
    /// 日付フォーマッター
    date_formatter: DateFormatter,
}

impl CellFormatter {
    /// 新しいCellFormatterを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// セルの値を変換
    ///
    /// # 引数
    ///
    /// * `cell` - calamineのセルデータ
    /// * `config` - 変換設定
    ///
    /// # 戻り値
    ///
    /// 変換後のセル値。変換に失敗することはありません。
    pub fn format_cell(&self, cell: &Data, config: &ConversionConfig) -> CellValue {
        match cell {
            Data::Empty => CellValue::Missing,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Integer(*i),
            Data::Float(f) => CellValue::Float(*f),
            Data::Bool(b) => CellValue::Text(if *b { "True" } else { "False" }.to_string()),
            Data::DateTime(dt) => CellValue::Text(self.date_formatter.format(dt, config)),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Text(e.to_string()),
        }
    }
}

/// 時刻のみのセルの出力形式
const TIME_OF_DAY_PATTERN: &str = "%H:%M:%S";

/// 1日の秒数
const SECONDS_PER_DAY: f64 = 86_400.0;

/// 日付フォーマッター
///
/// Excelの日時値を設定された形式の文字列に変換します。
/// 1900年／1904年エポックの判定はcalamineに委ねます。
#[derive(Debug, Default)]
pub(crate) struct DateFormatter;

impl DateFormatter {
    /// 日時値をフォーマット
    ///
    /// 期間（duration）として保存された値は`H:MM:SS`形式で出力します。
    /// シリアル値が0以上1未満の値は時刻のみとみなし、設定に関わらず`HH:MM:SS`で出力します。
    /// 日付に変換できない範囲のシリアル値は、数値のまま文字列化します。
    pub fn format(&self, value: &ExcelDateTime, config: &ConversionConfig) -> String {
        if value.is_duration() {
            return match value.as_duration() {
                Some(duration) => format_duration(duration),
                None => value.as_f64().to_string(),
            };
        }

        if let Some(time) = time_of_day(value.as_f64()) {
            return time.format(TIME_OF_DAY_PATTERN).to_string();
        }

        match value.as_datetime() {
            Some(datetime) => datetime.format(config.date_format.pattern()).to_string(),
            None => value.as_f64().to_string(),
        }
    }
}

/// 日付部分を持たないシリアル値を時刻に変換する
///
/// 秒単位に丸めた結果が24:00:00になる値は時刻として扱わない。
fn time_of_day(serial: f64) -> Option<NaiveTime> {
    if !(0.0..1.0).contains(&serial) {
        return None;
    }
    let seconds = (serial * SECONDS_PER_DAY).round() as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
}

fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        total / 3600,
        (total / 60) % 60,
        total % 60
    )
}
