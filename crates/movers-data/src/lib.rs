//! 마켓 무버 데이터 수집 및 저장.
//!
//! 이 crate는 다음을 제공합니다:
//! - 단위 접미사(K/M/B/T) 수량 정규화
//! - 마켓 무버 테이블 파싱
//! - 국가 목록 탐색/로드 (브라우저 세션 기반)
//! - 국가 선택 Provider 추상화
//! - 국가 목록 및 수집 결과 CSV 저장
//! - 단계별 진단 출력 (Verbosity)

pub mod verbosity;

pub mod countries;
pub mod error;
pub mod model;
pub mod provider;
pub mod quantity;
pub mod selection;
pub mod storage;

pub use error::{DataError, Result};
pub use model::{CountryEntry, MoverQuote, ScrapedRow};
pub use quantity::normalize_quantity;
pub use verbosity::Verbosity;

// 국가 목록 재내보내기
pub use countries::{CountryListProvider, CountrySource, SAMPLE_COUNTRY};

// 데이터 소스 재내보내기
pub use provider::{
    market_url, BrowserElement, BrowserLauncher, BrowserSession, HttpPageFetcher,
    MoversTableExtractor, PageFetcher,
};

// 선택 Provider 재내보내기
pub use selection::{AcceptAll, SelectionProvider};

// 저장소 재내보내기
pub use storage::{
    load_country_list, write_country_list, ResultSink, COUNTRY_LIST_FILE, COUNTRY_LIST_HEADER,
    RESULTS_FILE, RESULTS_HEADER,
};
