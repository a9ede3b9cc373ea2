//! Scheduled market mover collector.
//!
//! 이 crate는 마켓 무버 수집 작업을 실행하는 바이너리를 제공합니다:
//! - 환경변수 기반 설정
//! - 반복 수집 스케줄러 (반복 간 최소 대기 시간 보장)
//! - 국가 결정 → 수집 → 결과 저장으로 이어지는 전체 작업
//! - 터미널 국가 선택기

pub mod config;
pub mod error;
pub mod job;
pub mod scheduler;
pub mod selector;
pub mod stats;

pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use job::{run_job, JobOptions};
pub use scheduler::{IterationScheduler, MIN_WAIT};
pub use selector::TerminalSelector;
pub use stats::RunStats;
