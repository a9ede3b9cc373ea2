//! 전체 수집 작업.
//!
//! 국가 결정 → 반복 수집 → 결과 저장 순서로 실행합니다.
//! 결과 파일은 모든 반복이 성공한 뒤 한 번만 기록합니다.

use std::path::{Path, PathBuf};

use movers_data::storage::resolve_output_dir;
use movers_data::{
    info_if, CountryListProvider, CountrySource, PageFetcher, ResultSink, Verbosity, RESULTS_FILE,
};

use crate::{IterationScheduler, Result};

/// 작업 옵션
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOptions {
    /// 국가 목록 출처
    pub source: CountrySource,
    /// 전체 국가 탐색 여부 (`source` 무시)
    pub all_countries: bool,
    /// 결과 디렉토리 (없으면 기본 데이터 디렉토리)
    pub output_dir: Option<PathBuf>,
    /// 반복 횟수
    pub loops: u32,
    /// 반복 간 대기 시간 (분, 최소 대기 시간 미만이면 올림)
    pub wait_minutes: u64,
    /// 진단 출력 수준
    pub verbosity: Verbosity,
}

impl Default for JobOptions {
    fn default() -> Self {
        Self {
            source: CountrySource::Default,
            all_countries: false,
            output_dir: None,
            loops: 1,
            wait_minutes: 0,
            verbosity: Verbosity::default(),
        }
    }
}

impl JobOptions {
    /// 샘플 시장 1회 수집 (디버그 출력)
    pub fn testing() -> Self {
        Self {
            source: CountrySource::Sample,
            verbosity: Verbosity::Debug,
            ..Self::default()
        }
    }
}

/// 수집 작업 실행 후 결과 파일 경로 반환
pub async fn run_job<F: PageFetcher>(
    countries: &CountryListProvider,
    scheduler: &IterationScheduler<F>,
    data_dir: &Path,
    options: &JobOptions,
) -> Result<PathBuf> {
    // 긴 수집 전에 출력 위치부터 확인
    let output_dir = resolve_output_dir(options.output_dir.as_deref(), data_dir)?;
    let results_path = output_dir.join(RESULTS_FILE);

    info_if!(options.verbosity, "Step 1/3: 국가 목록 결정");
    let entries = countries
        .resolve(&options.source, options.all_countries)
        .await?;

    info_if!(options.verbosity, "Step 2/3: 마켓 무버 수집");
    let (rows, stats) = scheduler
        .run_with_stats(&entries, options.loops, options.wait_minutes)
        .await?;

    info_if!(options.verbosity, "Step 3/3: 결과 저장");
    ResultSink::new(options.verbosity).write(&results_path, &rows)?;

    if options.verbosity.info_enabled() {
        stats.log_summary("마켓 무버 수집");
    }

    Ok(results_path)
}
