//! 국가 항목 및 수집 행 모델.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 조회 가능한 하나의 시장.
///
/// 국가 선택 메뉴에서 탐색되거나 저장된 국가 목록 파일에서 로드됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountryEntry {
    /// 지역 (예: North America, Europe)
    #[serde(rename = "Region", alias = "Continent")]
    pub region: String,
    /// 국가명 (예: USA)
    #[serde(rename = "Country")]
    pub country: String,
    /// 마켓 페이지 URL 경로 토큰 (예: stocks-usa)
    #[serde(rename = "URLToken")]
    pub market_token: String,
}

impl CountryEntry {
    pub fn new(
        region: impl Into<String>,
        country: impl Into<String>,
        market_token: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            country: country.into(),
            market_token: market_token.into(),
        }
    }
}

impl std::fmt::Display for CountryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {} | {}", self.region, self.country, self.market_token)
    }
}

/// 마켓 무버 테이블의 한 행 (국가/시각 태그 이전).
///
/// 모든 수량은 백만 단위로 정규화되어 있습니다.
#[derive(Debug, Clone, PartialEq)]
pub struct MoverQuote {
    /// 종목 심볼
    pub symbol: String,
    /// 종목명
    pub name: String,
    /// 현재가
    pub price: Decimal,
    /// 통화 코드
    pub currency: String,
    /// 거래량 (백만)
    pub volume_millions: Decimal,
    /// 시가총액 (백만), 셀이 비어 있으면 None
    pub market_cap_millions: Option<Decimal>,
    /// 섹터, 자리표시 대시이면 None
    pub sector: Option<String>,
}

/// 하나의 수집 시점에 관측된 종목 행.
///
/// 반복 간 `(timestamp, country, symbol)` 중복은 제거하지 않습니다.
/// 연속된 시계열 샘플입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedRow {
    pub timestamp: DateTime<Utc>,
    pub region: String,
    pub country: String,
    pub symbol: String,
    pub name: String,
    pub price: Decimal,
    pub currency: String,
    pub volume_millions: Decimal,
    pub market_cap_millions: Option<Decimal>,
    pub sector: Option<String>,
}

impl ScrapedRow {
    /// 반복 시각과 국가 정보로 시세 행에 태그를 붙입니다.
    pub fn tag(timestamp: DateTime<Utc>, entry: &CountryEntry, quote: MoverQuote) -> Self {
        Self {
            timestamp,
            region: entry.region.clone(),
            country: entry.country.clone(),
            symbol: quote.symbol,
            name: quote.name,
            price: quote.price,
            currency: quote.currency,
            volume_millions: quote.volume_millions,
            market_cap_millions: quote.market_cap_millions,
            sector: quote.sector,
        }
    }
}
