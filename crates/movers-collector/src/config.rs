//! 환경변수 기반 설정 모듈.

use std::path::PathBuf;
use std::time::Duration;

use movers_data::provider::fetcher::{FetcherConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};

use crate::{CollectorError, Result};

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 기본 데이터 디렉토리 (국가 목록 + 결과)
    pub data_dir: PathBuf,
    /// 마켓 페이지 설정
    pub fetch: FetchConfig,
    /// 국가 탐색 브라우저 설정
    pub browser: BrowserConfig,
}

/// 마켓 페이지 조회 설정
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// 사이트 루트 URL
    pub base_url: String,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// User-Agent
    pub user_agent: String,
}

/// 국가 탐색 브라우저 설정
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// headless 실행 여부
    pub headless: bool,
    /// 국가 메뉴 요소 최대 대기 시간 (초)
    pub menu_timeout_secs: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            fetch: FetchConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                request_timeout_secs: 30,
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
            browser: BrowserConfig {
                headless: true,
                menu_timeout_secs: 10,
            },
        }
    }
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드 (`.env` 파일이 있으면 먼저 읽음)
    ///
    /// 설정되지 않은 변수는 기본값을 쓰고, 설정되었지만 해석할 수 없는 값은 오류입니다.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Ok(Self {
            data_dir: std::env::var("MOVERS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            fetch: FetchConfig {
                base_url: std::env::var("MOVERS_BASE_URL").unwrap_or(defaults.fetch.base_url),
                request_timeout_secs: env_var_parse(
                    "MOVERS_REQUEST_TIMEOUT_SECS",
                    defaults.fetch.request_timeout_secs,
                )?,
                user_agent: std::env::var("MOVERS_USER_AGENT")
                    .unwrap_or(defaults.fetch.user_agent),
            },
            browser: BrowserConfig {
                headless: env_var_bool("MOVERS_BROWSER_HEADLESS", defaults.browser.headless)?,
                menu_timeout_secs: env_var_parse(
                    "MOVERS_MENU_TIMEOUT_SECS",
                    defaults.browser.menu_timeout_secs,
                )?,
            },
        })
    }
}

impl FetchConfig {
    /// HTTP fetcher 설정으로 변환
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            timeout: Duration::from_secs(self.request_timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

impl BrowserConfig {
    /// 메뉴 대기 시간을 Duration으로 반환
    pub fn menu_timeout(&self) -> Duration {
        Duration::from_secs(self.menu_timeout_secs)
    }
}

/// 환경변수에서 값을 파싱 (없으면 기본값)
fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(v) => v
            .trim()
            .parse()
            .map_err(|_| CollectorError::Config(format!("{} 값을 해석할 수 없습니다: {:?}", key, v))),
        Err(_) => Ok(default),
    }
}

/// 환경변수에서 bool 값 파싱 (true/1, false/0)
fn env_var_bool(key: &str, default: bool) -> Result<bool> {
    match std::env::var(key) {
        Ok(v) => match v.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(CollectorError::Config(format!(
                "{} 값은 true/false 여야 합니다: {:?}",
                key, v
            ))),
        },
        Err(_) => Ok(default),
    }
}
