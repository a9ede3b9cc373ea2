//! 국가 목록 Provider.
//!
//! 조회할 (지역, 국가, 시장 토큰) 목록을 탐색하거나 로드합니다.
//!
//! ## 탐색 절차
//! 1. 브라우저 세션으로 미국 마켓 페이지 이동
//! 2. `US stocks` 버튼 클릭 → 국가 선택 다이얼로그 표시
//! 3. 다이얼로그 본문에서 (지역 헤더, 국가 링크 묶음) 쌍을 메뉴 순서대로 읽음
//!
//! 탐색 또는 선택을 거친 목록은 항상 기본 데이터 디렉토리의
//! `countries.csv`에 덮어써서 다음 실행이 재탐색을 피할 수 있게 합니다.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use scraper::{ElementRef, Html, Selector};

use crate::provider::{market_url, BrowserLauncher, BrowserSession};
use crate::selection::{AcceptAll, SelectionProvider};
use crate::storage::{ensure_directory, load_country_list, write_country_list, COUNTRY_LIST_FILE};
use crate::{debug_if, info_if, CountryEntry, DataError, Result, Verbosity};

/// 테스트/샘플용 단일 시장 (지역, 국가, 토큰)
pub const SAMPLE_COUNTRY: (&str, &str, &str) = ("North America", "USA", "stocks-usa");

/// 국가 선택 다이얼로그를 여는 버튼 라벨
const MENU_BUTTON_LABEL: &str = "US stocks";

/// 국가 선택 다이얼로그 셀렉터
const DIALOG_SELECTOR: &str = "div[class^='dialog-']";

/// 다이얼로그 안에서 지역 목록을 담은 div의 위치 (`./div/div[3]`)
const MENU_CONTENT_INDEX: usize = 2;

/// 국가 목록 출처
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CountrySource {
    /// 기본 파일이 있으면 로드, 없으면 전체 탐색
    #[default]
    Default,
    /// 지정된 국가 목록 파일
    File(PathBuf),
    /// 탐색 후 선택 Provider로 필터링
    Interactive,
    /// 단일 샘플 시장 (탐색/파일 없음)
    Sample,
}

/// 국가 목록 Provider
pub struct CountryListProvider {
    launcher: Arc<dyn BrowserLauncher>,
    selection: Arc<dyn SelectionProvider>,
    data_dir: PathBuf,
    base_url: String,
    menu_timeout: Duration,
    verbosity: Verbosity,
}

impl CountryListProvider {
    /// 기본 설정으로 생성 (선택 Provider: 전체 선택)
    pub fn new(launcher: Arc<dyn BrowserLauncher>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            launcher,
            selection: Arc::new(AcceptAll),
            data_dir: data_dir.into(),
            base_url: crate::provider::fetcher::DEFAULT_BASE_URL.to_string(),
            menu_timeout: Duration::from_secs(10),
            verbosity: Verbosity::default(),
        }
    }

    pub fn with_selection(mut self, selection: Arc<dyn SelectionProvider>) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_menu_timeout(mut self, timeout: Duration) -> Self {
        self.menu_timeout = timeout;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// 기본 국가 목록 파일 경로
    pub fn default_list_path(&self) -> PathBuf {
        self.data_dir.join(COUNTRY_LIST_FILE)
    }

    /// 사이트의 국가 선택 메뉴에서 전체 국가를 메뉴 순서대로 탐색
    ///
    /// 세션은 이 호출 안에서 열고 닫습니다. 탐색이 실패해도 세션은 닫습니다.
    pub async fn discover_all(&self) -> Result<Vec<CountryEntry>> {
        let mut session = self.launcher.launch().await?;
        info_if!(self.verbosity, "브라우저 세션 준비 완료");

        let result = self.read_country_menu(session.as_mut()).await;
        let closed = session.close().await;

        let entries = result?;
        closed?;

        for entry in &entries {
            debug_if!(
                self.verbosity,
                region = %entry.region,
                country = %entry.country,
                token = %entry.market_token,
                "국가 탐색"
            );
        }
        info_if!(self.verbosity, count = entries.len(), "국가 탐색 완료");
        Ok(entries)
    }

    async fn read_country_menu(&self, session: &mut dyn BrowserSession) -> Result<Vec<CountryEntry>> {
        let entry_url = market_url(&self.base_url, SAMPLE_COUNTRY.2);
        session.goto(&entry_url).await?;

        let buttons = session.wait_for("button", self.menu_timeout).await?;
        let button = buttons
            .iter()
            .find(|b| b.text.trim() == MENU_BUTTON_LABEL)
            .ok_or_else(|| {
                DataError::parse(format!("'{}' 버튼을 찾을 수 없습니다", MENU_BUTTON_LABEL))
            })?;
        session.click(button).await?;

        session.wait_for(DIALOG_SELECTOR, self.menu_timeout).await?;
        let html = session.content().await?;

        parse_country_menu(&html)
    }

    /// 저장된 국가 목록 파일 로드
    pub fn load_from(&self, path: &Path) -> Result<Vec<CountryEntry>> {
        let entries = load_country_list(path)?;
        info_if!(
            self.verbosity,
            path = %path.display(),
            count = entries.len(),
            "국가 목록 파일 사용"
        );
        Ok(entries)
    }

    /// 국가 목록 결정.
    ///
    /// - `all_countries`: 전체 탐색 결과를 저장 후 사용 (`source` 무시)
    /// - `File`: 해당 파일 로드 (없으면 `PathNotFound`)
    /// - `Interactive`: 탐색 결과를 선택 Provider로 필터링 후 저장
    /// - `Default`: 기본 파일이 있으면 로드, 없으면 전체 탐색 후 저장
    /// - `Sample`: 단일 샘플 시장
    pub async fn resolve(
        &self,
        source: &CountrySource,
        all_countries: bool,
    ) -> Result<Vec<CountryEntry>> {
        let entries = if all_countries {
            let discovered = self.discover_all().await?;
            self.persist(discovered)?
        } else {
            match source {
                CountrySource::Sample => {
                    let (region, country, token) = SAMPLE_COUNTRY;
                    vec![CountryEntry::new(region, country, token)]
                }
                CountrySource::File(path) => self.load_from(path)?,
                CountrySource::Interactive => {
                    let discovered = self.discover_all().await?;
                    let total = discovered.len();
                    let selected = self.selection.select(discovered)?;
                    info_if!(
                        self.verbosity,
                        provider = self.selection.name(),
                        selected = selected.len(),
                        total,
                        "국가 선택 완료"
                    );
                    self.persist(selected)?
                }
                CountrySource::Default => {
                    let default_path = self.default_list_path();
                    if default_path.exists() {
                        self.load_from(&default_path)?
                    } else {
                        info_if!(
                            self.verbosity,
                            path = %default_path.display(),
                            "기본 국가 목록 없음, 전체 탐색"
                        );
                        let discovered = self.discover_all().await?;
                        self.persist(discovered)?
                    }
                }
            }
        };

        info_if!(
            self.verbosity,
            count = entries.len(),
            "조회 대상 국가 결정"
        );
        Ok(entries)
    }

    /// 기본 위치에 국가 목록 저장 (덮어씀)
    fn persist(&self, entries: Vec<CountryEntry>) -> Result<Vec<CountryEntry>> {
        ensure_directory(&self.data_dir)?;
        let path = self.default_list_path();
        write_country_list(&path, &entries)?;
        info_if!(
            self.verbosity,
            path = %path.display(),
            count = entries.len(),
            "국가 목록 저장"
        );
        Ok(entries)
    }
}

/// 국가 선택 다이얼로그 HTML 파싱.
///
/// 다이얼로그 구조 (`div[class^=dialog-] > div > div:nth(3)`):
/// ```html
/// <div class="dialog-x">
///   <div>
///     <div>title</div><div>search</div>
///     <div>
///       <div>tabs</div>
///       <div>NORTH AMERICA</div>
///       <div><a href="/markets/stocks-usa/market-movers-active/"><span>USA</span>...</a></div>
///       <div>EUROPE</div>
///       <div>...</div>
///     </div>
///   </div>
/// </div>
/// ```
pub fn parse_country_menu(html: &str) -> Result<Vec<CountryEntry>> {
    let document = Html::parse_document(html);
    let dialog_selector = selector(DIALOG_SELECTOR)?;
    let a_selector = selector("a")?;

    let dialog = document
        .select(&dialog_selector)
        .next()
        .ok_or_else(|| DataError::parse("국가 선택 다이얼로그를 찾을 수 없습니다"))?;

    let wrapper = child_divs(dialog)
        .into_iter()
        .next()
        .ok_or_else(|| DataError::parse("다이얼로그 본문이 없습니다"))?;
    let content = child_divs(wrapper)
        .into_iter()
        .nth(MENU_CONTENT_INDEX)
        .ok_or_else(|| DataError::parse("국가 메뉴 영역이 없습니다"))?;

    // 첫 번째 div는 탭 영역, 이후 (지역 헤더, 국가 묶음) 쌍
    let sections: Vec<ElementRef<'_>> = child_divs(content).into_iter().skip(1).collect();
    if sections.is_empty() {
        return Err(DataError::parse("국가 메뉴가 비어 있습니다"));
    }
    if sections.len() % 2 != 0 {
        return Err(DataError::parse(format!(
            "국가 메뉴 구조 오류: 지역/국가 묶음 수가 맞지 않습니다 ({}개)",
            sections.len()
        )));
    }

    let mut entries = Vec::new();
    for pair in sections.chunks(2) {
        let region = title_case(&element_text(&pair[0]));
        for link in pair[1].select(&a_selector) {
            let country = link
                .text()
                .map(str::trim)
                .find(|t| !t.is_empty())
                .ok_or_else(|| DataError::parse(format!("{}: 국가명 없는 링크", region)))?
                .to_string();
            let href = link
                .value()
                .attr("href")
                .ok_or_else(|| DataError::parse(format!("{}: href 없음", country)))?;
            let token = token_from_href(href)
                .ok_or_else(|| DataError::parse(format!("시장 토큰 추출 실패: {}", href)))?;

            entries.push(CountryEntry::new(region.clone(), country, token));
        }
    }

    Ok(entries)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DataError::parse(format!("잘못된 셀렉터 {}: {:?}", css, e)))
}

/// 직계 자식 div 목록
fn child_divs(element: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "div")
        .collect()
}

fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 마켓 링크에서 시장 토큰 추출
///
/// "/markets/stocks-germany/market-movers-active/" -> "stocks-germany"
fn token_from_href(href: &str) -> Option<String> {
    href.trim_end_matches('/')
        .rsplit('/')
        .nth(1)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// 단어 첫 글자만 대문자 ("NORTH AMERICA" -> "North America")
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
