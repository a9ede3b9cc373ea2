//! 반복 수집 스케줄러.
//!
//! 반복마다 시작 시각 하나를 기록하고 국가 목록 순서대로 한 곳씩 페이지를 조회합니다.
//! 반복 사이에는 요청된 대기 시간과 [`MIN_WAIT`] 중 긴 쪽만큼 기다립니다.
//!
//! 실패는 잡지 않습니다. 한 국가라도 실패하면 그때까지 모은 행을 모두 버리고
//! 에러를 그대로 반환합니다.

use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;

use movers_data::{
    debug_if, info_if, market_url, CountryEntry, MoversTableExtractor, PageFetcher, ScrapedRow,
    Verbosity,
};

use crate::{Result, RunStats};

/// 반복 간 최소 대기 시간 (소스 사이트 요청 간격 보호)
pub const MIN_WAIT: Duration = Duration::from_secs(5 * 60);

/// 요청된 대기 시간(분)을 최소 대기 시간 이상으로 올림
pub fn effective_wait(wait_minutes: u64) -> Duration {
    Duration::from_secs(wait_minutes.saturating_mul(60)).max(MIN_WAIT)
}

/// 반복 진행률 (%), 1부터 세는 `iteration` 기준
fn progress_percent(iteration: u32, loops: u32) -> f64 {
    f64::from(iteration) / f64::from(loops) * 100.0
}

/// 반복 수집 스케줄러
pub struct IterationScheduler<F: PageFetcher> {
    fetcher: F,
    extractor: MoversTableExtractor,
    base_url: String,
    verbosity: Verbosity,
}

impl<F: PageFetcher> IterationScheduler<F> {
    pub fn new(fetcher: F, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            extractor: MoversTableExtractor::default(),
            base_url: base_url.into(),
            verbosity: Verbosity::default(),
        }
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self.extractor = MoversTableExtractor::new(verbosity);
        self
    }

    /// `loops`번 전체 국가를 조회하여 누적된 행 반환
    pub async fn run(
        &self,
        countries: &[CountryEntry],
        loops: u32,
        wait_minutes: u64,
    ) -> Result<Vec<ScrapedRow>> {
        let (rows, _) = self.run_with_stats(countries, loops, wait_minutes).await?;
        Ok(rows)
    }

    /// [`run`](Self::run)과 같으며 실행 통계를 함께 반환
    pub async fn run_with_stats(
        &self,
        countries: &[CountryEntry],
        loops: u32,
        wait_minutes: u64,
    ) -> Result<(Vec<ScrapedRow>, RunStats)> {
        let wait = effective_wait(wait_minutes);
        let started = Instant::now();
        let mut stats = RunStats::new();
        let mut rows = Vec::new();

        info_if!(
            self.verbosity,
            countries = countries.len(),
            loops,
            wait_secs = wait.as_secs(),
            "반복 수집 시작"
        );

        for iteration in 1..=loops {
            let iteration_started = Instant::now();
            let timestamp = Utc::now();
            info_if!(
                self.verbosity,
                "반복 {}/{} ({:.0}%)",
                iteration,
                loops,
                progress_percent(iteration, loops)
            );

            for (idx, entry) in countries.iter().enumerate() {
                let url = market_url(&self.base_url, &entry.market_token);
                info_if!(
                    self.verbosity,
                    "[{:02}/{:02}] {}",
                    idx + 1,
                    countries.len(),
                    url
                );

                let html = self.fetcher.fetch(&url).await?;
                let quotes = self.extractor.extract(&html)?;
                let count = quotes.len();
                rows.extend(
                    quotes
                        .into_iter()
                        .map(|quote| ScrapedRow::tag(timestamp, entry, quote)),
                );
                stats.pages += 1;

                debug_if!(
                    self.verbosity,
                    country = %entry.country,
                    rows = count,
                    total = rows.len(),
                    "국가 수집 완료"
                );
            }

            stats.iterations += 1;
            info_if!(
                self.verbosity,
                iteration,
                elapsed = format!("{:.1}s", iteration_started.elapsed().as_secs_f64()),
                "반복 완료"
            );

            if iteration < loops {
                info_if!(
                    self.verbosity,
                    "다음 반복까지 {}초 대기",
                    wait.as_secs()
                );
                tokio::time::sleep(wait).await;
            }
        }

        stats.rows = rows.len();
        stats.elapsed = started.elapsed();
        Ok((rows, stats))
    }
}
