//! 브라우저 자동화 세션.
//!
//! 국가 탐색에서만 사용되는 capability입니다. 세션은 탐색 호출 안에서
//! 열리고, 사용되고, 닫힙니다. 공유하거나 재사용하지 않습니다.

use std::time::Duration;

use async_trait::async_trait;

use crate::{DataError, Result};

/// 요소 조회 재시도 간격
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// 세션이 찾은 요소의 스냅샷.
///
/// `handle`은 같은 세션 안에서만 유효한 요소 식별자입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserElement {
    pub handle: usize,
    /// 렌더링된 텍스트
    pub text: String,
}

/// 브라우저 세션 capability (탐색, 요소 조회, 클릭)
#[async_trait]
pub trait BrowserSession: Send {
    /// URL로 이동
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// CSS 셀렉터에 일치하는 요소 목록
    async fn find_elements(&mut self, css: &str) -> Result<Vec<BrowserElement>>;

    /// 요소 클릭
    async fn click(&mut self, element: &BrowserElement) -> Result<()>;

    /// 현재 DOM의 HTML
    async fn content(&mut self) -> Result<String>;

    /// 세션 종료
    async fn close(self: Box<Self>) -> Result<()>;

    /// 요소가 나타날 때까지 대기 (최대 `timeout`)
    async fn wait_for(&mut self, css: &str, timeout: Duration) -> Result<Vec<BrowserElement>> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let found = self.find_elements(css).await?;
            if !found.is_empty() {
                return Ok(found);
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(DataError::BrowserError(format!(
                    "요소 대기 시간 초과: {} ({:?})",
                    css, timeout
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

/// 세션 생성기.
///
/// 탐색 호출마다 새 세션을 엽니다.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>>;
}

#[cfg(feature = "browser")]
pub mod chromium {
    //! chromiumoxide(CDP) 기반 세션.

    use chromiumoxide::browser::{Browser, BrowserConfig};
    use chromiumoxide::element::Element;
    use chromiumoxide::Page;
    use futures::StreamExt;
    use tokio::task::JoinHandle;

    use super::*;

    /// Chromium 실행기
    #[derive(Debug, Clone)]
    pub struct ChromiumLauncher {
        headless: bool,
    }

    impl ChromiumLauncher {
        pub fn new(headless: bool) -> Self {
            Self { headless }
        }
    }

    impl Default for ChromiumLauncher {
        fn default() -> Self {
            Self::new(true)
        }
    }

    #[async_trait]
    impl BrowserLauncher for ChromiumLauncher {
        async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
            let mut builder = BrowserConfig::builder();
            if !self.headless {
                builder = builder.with_head();
            }
            let config = builder.build().map_err(DataError::BrowserError)?;

            let (browser, mut handler) = Browser::launch(config)
                .await
                .map_err(|e| DataError::BrowserError(format!("브라우저 실행 실패: {}", e)))?;

            // CDP 이벤트 루프
            let events = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| DataError::BrowserError(e.to_string()))?;

            Ok(Box::new(ChromiumSession {
                browser,
                page,
                events,
                elements: Vec::new(),
            }))
        }
    }

    /// Chromium 세션
    pub struct ChromiumSession {
        browser: Browser,
        page: Page,
        events: JoinHandle<()>,
        /// 마지막 조회로 얻은 요소 (handle = 인덱스)
        elements: Vec<Element>,
    }

    fn cdp_error(err: chromiumoxide::error::CdpError) -> DataError {
        DataError::BrowserError(err.to_string())
    }

    #[async_trait]
    impl BrowserSession for ChromiumSession {
        async fn goto(&mut self, url: &str) -> Result<()> {
            self.elements.clear();
            self.page.goto(url).await.map_err(cdp_error)?;
            self.page.wait_for_navigation().await.map_err(cdp_error)?;
            Ok(())
        }

        async fn find_elements(&mut self, css: &str) -> Result<Vec<BrowserElement>> {
            let found = self.page.find_elements(css).await.map_err(cdp_error)?;

            let offset = self.elements.len();
            let mut snapshots = Vec::with_capacity(found.len());
            for (i, element) in found.iter().enumerate() {
                let text = element
                    .inner_text()
                    .await
                    .map_err(cdp_error)?
                    .unwrap_or_default();
                snapshots.push(BrowserElement {
                    handle: offset + i,
                    text,
                });
            }
            self.elements.extend(found);
            Ok(snapshots)
        }

        async fn click(&mut self, element: &BrowserElement) -> Result<()> {
            let target = self.elements.get(element.handle).ok_or_else(|| {
                DataError::BrowserError(format!("알 수 없는 요소 handle: {}", element.handle))
            })?;
            target.click().await.map_err(cdp_error)?;
            Ok(())
        }

        async fn content(&mut self) -> Result<String> {
            self.page.content().await.map_err(cdp_error)
        }

        async fn close(self: Box<Self>) -> Result<()> {
            let ChromiumSession {
                mut browser,
                events,
                ..
            } = *self;
            browser.close().await.map_err(cdp_error)?;
            let _ = browser.wait().await;
            events.abort();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 두 번째 조회부터 요소가 보이는 세션
    struct SlowMenu {
        calls: usize,
    }

    #[async_trait]
    impl BrowserSession for SlowMenu {
        async fn goto(&mut self, _url: &str) -> Result<()> {
            Ok(())
        }

        async fn find_elements(&mut self, _css: &str) -> Result<Vec<BrowserElement>> {
            self.calls += 1;
            if self.calls < 3 {
                Ok(Vec::new())
            } else {
                Ok(vec![BrowserElement {
                    handle: 0,
                    text: "menu".to_string(),
                }])
            }
        }

        async fn click(&mut self, _element: &BrowserElement) -> Result<()> {
            Ok(())
        }

        async fn content(&mut self) -> Result<String> {
            Ok(String::new())
        }

        async fn close(self: Box<Self>) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_polls_until_found() {
        let mut session = SlowMenu { calls: 0 };
        let found = session
            .wait_for("div", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(found[0].text, "menu");
        assert_eq!(session.calls, 3);
    }

    /// CDP 연결이 끊긴 세션
    struct Disconnected;

    #[async_trait]
    impl BrowserSession for Disconnected {
        async fn goto(&mut self, _url: &str) -> Result<()> {
            Ok(())
        }

        async fn find_elements(&mut self, _css: &str) -> Result<Vec<BrowserElement>> {
            Err(DataError::BrowserError("connection closed".to_string()))
        }

        async fn click(&mut self, _element: &BrowserElement) -> Result<()> {
            Ok(())
        }

        async fn content(&mut self) -> Result<String> {
            Ok(String::new())
        }

        async fn close(self: Box<Self>) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_surfaces_session_error_immediately() {
        let started = tokio::time::Instant::now();

        let err = Disconnected
            .wait_for("div", Duration::from_secs(10))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Browser session error: connection closed");
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_times_out() {
        let mut session = SlowMenu { calls: 0 };
        let result = session.wait_for("div", Duration::from_millis(100)).await;
        assert!(matches!(result, Err(DataError::BrowserError(_))));
    }
}
