//! 수집 통계 구조체.

use std::time::Duration;

/// 수집 실행 통계
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// 완료된 반복 수
    pub iterations: usize,
    /// 조회한 국가 페이지 수 (반복 포함)
    pub pages: usize,
    /// 수집된 총 행 수
    pub rows: usize,
    /// 소요 시간
    pub elapsed: Duration,
}

impl RunStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 페이지당 평균 행 수
    pub fn rows_per_page(&self) -> f64 {
        if self.pages == 0 {
            0.0
        } else {
            self.rows as f64 / self.pages as f64
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            iterations = self.iterations,
            pages = self.pages,
            rows = self.rows,
            rows_per_page = format!("{:.1}", self.rows_per_page()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "수집 완료"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_per_page() {
        assert_eq!(RunStats::new().rows_per_page(), 0.0);

        let stats = RunStats {
            iterations: 2,
            pages: 4,
            rows: 10,
            elapsed: Duration::ZERO,
        };
        assert_eq!(stats.rows_per_page(), 2.5);
    }
}
