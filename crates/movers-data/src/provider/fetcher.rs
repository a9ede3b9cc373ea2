//! 마켓 페이지 가져오기.
//!
//! 국가별 마켓 무버 페이지 URL 형식:
//! `{base}/markets/{token}/market-movers-active/`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{DataError, Result};

/// 기본 사이트 주소
pub const DEFAULT_BASE_URL: &str = "https://www.tradingview.com";

/// 기본 User-Agent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// 시장 토큰으로 마켓 무버 페이지 URL 생성
pub fn market_url(base_url: &str, token: &str) -> String {
    format!(
        "{}/markets/{}/market-movers-active/",
        base_url.trim_end_matches('/'),
        token
    )
}

/// 페이지 조회 capability.
///
/// 국가별, 반복별로 한 번씩 호출됩니다.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// URL의 원본 페이지 내용 반환
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP 페이지 조회 설정
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// 요청 타임아웃
    pub timeout: Duration,
    /// User-Agent 헤더
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// reqwest 기반 페이지 조회
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// 기본 설정으로 생성
    pub fn new() -> Result<Self> {
        Self::with_config(&FetcherConfig::default())
    }

    /// 커스텀 설정으로 생성
    pub fn with_config(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DataError::FetchError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::FetchError(format!("Rate limit 초과: {}", url)));
        }
        if !status.is_success() {
            return Err(DataError::FetchError(format!("HTTP {} ({})", status, url)));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_url() {
        assert_eq!(
            market_url("https://www.tradingview.com", "stocks-usa"),
            "https://www.tradingview.com/markets/stocks-usa/market-movers-active/"
        );
        // 끝 슬래시 중복 방지
        assert_eq!(
            market_url("http://localhost:1234/", "stocks-japan"),
            "http://localhost:1234/markets/stocks-japan/market-movers-active/"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/markets/stocks-usa/market-movers-active/")
            .with_status(200)
            .with_body("<table></table>")
            .create_async()
            .await;

        let fetcher = HttpPageFetcher::new().unwrap();
        let body = fetcher
            .fetch(&market_url(&server.url(), "stocks-usa"))
            .await
            .unwrap();

        assert_eq!(body, "<table></table>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_non_success_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/markets/stocks-nowhere/market-movers-active/")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = HttpPageFetcher::new().unwrap();
        let result = fetcher
            .fetch(&market_url(&server.url(), "stocks-nowhere"))
            .await;

        assert!(matches!(result, Err(DataError::FetchError(_))));
    }

    #[tokio::test]
    async fn test_fetch_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/markets/stocks-usa/market-movers-active/")
            .with_status(429)
            .create_async()
            .await;

        let fetcher = HttpPageFetcher::new().unwrap();
        let err = fetcher
            .fetch(&market_url(&server.url(), "stocks-usa"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Rate limit"));
    }
}
