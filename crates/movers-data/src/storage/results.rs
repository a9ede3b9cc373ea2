//! 수집 결과 파일 (ResultSink).
//!
//! 한 실행에 한 번만 호출되며, 대상 파일을 새로 만들거나 비운 뒤
//! 고정 헤더와 누적 순서 그대로의 행을 기록합니다. 추가(append) 모드는 없습니다.

use std::path::Path;

use chrono::SecondsFormat;
use csv::WriterBuilder;
use rust_decimal::Decimal;

use crate::quantity::STORAGE_SCALE;
use crate::{info_if, Result, ScrapedRow, Verbosity};

/// 기본 결과 파일명
pub const RESULTS_FILE: &str = "results.csv";

/// 결과 파일 헤더
pub const RESULTS_HEADER: [&str; 10] = [
    "Timestamp",
    "Region",
    "Country",
    "Symbol",
    "Name",
    "Price",
    "Currency",
    "Volume (M)",
    "Market Cap (M)",
    "Sector",
];

/// 결과 CSV 기록기
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultSink {
    verbosity: Verbosity,
}

impl ResultSink {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// 헤더 + 전체 행 기록 (기존 파일은 비움)
    pub fn write(&self, path: &Path, rows: &[ScrapedRow]) -> Result<()> {
        let mut wtr = WriterBuilder::new().has_headers(false).from_path(path)?;

        wtr.write_record(RESULTS_HEADER)?;
        for row in rows {
            wtr.write_record(&to_record(row))?;
        }
        wtr.flush()?;

        info_if!(
            self.verbosity,
            path = %path.display(),
            rows = rows.len(),
            "결과 저장 완료"
        );
        Ok(())
    }
}

/// 고정 소수점 6자리 표기
fn fixed(value: Decimal) -> String {
    format!("{:.6}", value.round_dp(STORAGE_SCALE))
}

fn to_record(row: &ScrapedRow) -> [String; 10] {
    [
        row.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        row.region.clone(),
        row.country.clone(),
        row.symbol.clone(),
        row.name.clone(),
        fixed(row.price),
        row.currency.clone(),
        fixed(row.volume_millions),
        row.market_cap_millions.map(fixed).unwrap_or_default(),
        row.sector.clone().unwrap_or_default(),
    ]
}
