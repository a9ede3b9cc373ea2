//! 데이터 Provider 모듈.
//!
//! 외부 사이트에서 데이터를 가져오는 Provider들을 정의합니다.
//!
//! ## 마켓 페이지
//! - `PageFetcher`: URL에 대한 원본 페이지 내용 조회 capability
//! - `HttpPageFetcher`: reqwest 기반 구현
//! - `MoversTableExtractor`: 마켓 무버 테이블 파서
//!
//! ## 브라우저 세션
//! - `BrowserSession` / `BrowserLauncher`: 국가 탐색용 브라우저 자동화 capability
//! - `ChromiumLauncher`: chromiumoxide 기반 구현 (`browser` feature)

pub mod browser;
pub mod fetcher;
pub mod movers;

pub use browser::{BrowserElement, BrowserLauncher, BrowserSession};
#[cfg(feature = "browser")]
pub use browser::chromium::{ChromiumLauncher, ChromiumSession};
pub use fetcher::{market_url, FetcherConfig, HttpPageFetcher, PageFetcher};
pub use movers::MoversTableExtractor;
