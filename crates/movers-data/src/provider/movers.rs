//! 마켓 무버 테이블 파서.
//!
//! 페이지의 첫 번째 `<table>`에서 헤더 행을 건너뛰고 행마다 고정 위치의 셀을 읽습니다.
//!
//! | 셀 | 내용 |
//! |---|---|
//! | 0 | 심볼(`<a>`) + 종목명(`<sup>`) |
//! | 2 | 가격 + 통화 (`"189.84 USD"`) |
//! | 4 | 거래량 (`"45.6 M"`) |
//! | 6 | 시가총액 + 통화 (`"2.95 T USD"`, 비어 있을 수 있음) |
//! | 끝에서 두 번째 | 섹터 (`"—"`이면 없음) |
//!
//! 행 하나라도 형식이 맞지 않으면 전체가 실패합니다. 부분 복구는 하지 않습니다.

use std::str::FromStr;

use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};

use crate::quantity::{normalize_quantity, STORAGE_SCALE};
use crate::{debug_if, DataError, MoverQuote, Result, Verbosity};

const TD_IDX_SYMBOL: usize = 0;
const TD_IDX_PRICE: usize = 2;
const TD_IDX_VOLUME: usize = 4;
const TD_IDX_MARKET_CAP: usize = 6;
/// 끝에서 두 번째 셀
const TD_IDX_SECTOR_FROM_END: usize = 2;

/// 빈 값을 나타내는 대시 표기
const PLACEHOLDER_DASHES: [&str; 3] = ["-", "\u{2014}", "\u{2013}"];

/// 마켓 무버 테이블 파서
#[derive(Debug, Clone, Copy, Default)]
pub struct MoversTableExtractor {
    verbosity: Verbosity,
}

impl MoversTableExtractor {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// 페이지 HTML에서 시세 행 목록 추출
    pub fn extract(&self, html: &str) -> Result<Vec<MoverQuote>> {
        let document = Html::parse_document(html);
        let table_selector = selector("table")?;
        let tr_selector = selector("tr")?;
        let td_selector = selector("td")?;

        let table = document
            .select(&table_selector)
            .next()
            .ok_or_else(|| DataError::parse("페이지에 테이블이 없습니다"))?;

        let mut quotes = Vec::new();
        for (idx, tr) in table.select(&tr_selector).enumerate().skip(1) {
            let cells: Vec<ElementRef<'_>> = tr.select(&td_selector).collect();
            let quote = self
                .parse_row(&cells)
                .map_err(|e| match e {
                    DataError::ParseError(msg) => {
                        DataError::ParseError(format!("{} (행 {})", msg, idx))
                    }
                    other => other,
                })?;
            debug_if!(
                self.verbosity,
                symbol = %quote.symbol,
                price = %quote.price,
                "행 파싱"
            );
            quotes.push(quote);
        }

        Ok(quotes)
    }

    fn parse_row(&self, cells: &[ElementRef<'_>]) -> Result<MoverQuote> {
        if cells.len() <= TD_IDX_MARKET_CAP {
            return Err(DataError::parse(format!(
                "셀 수 부족: {}개 (최소 {}개 필요)",
                cells.len(),
                TD_IDX_MARKET_CAP + 1
            )));
        }

        // 심볼 및 종목명
        let (symbol, name) = extract_symbol_and_name(&cells[TD_IDX_SYMBOL])?;

        // 가격 및 통화
        let (price, currency) = parse_price_cell(&cell_text(&cells[TD_IDX_PRICE]))?;

        // 거래량
        let volume_millions =
            normalize_quantity(&cell_text(&cells[TD_IDX_VOLUME]))?.round_dp(STORAGE_SCALE);

        // 시가총액
        let market_cap_millions = parse_market_cap_cell(&cell_text(&cells[TD_IDX_MARKET_CAP]))?
            .map(|v| v.round_dp(STORAGE_SCALE));

        // 섹터
        let sector = parse_sector_cell(&cell_text(
            &cells[cells.len() - TD_IDX_SECTOR_FROM_END],
        ));

        Ok(MoverQuote {
            symbol,
            name,
            price,
            currency,
            volume_millions,
            market_cap_millions,
            sector,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DataError::parse(format!("잘못된 셀렉터 {}: {:?}", css, e)))
}

fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// 첫 번째 셀에서 심볼(`<a>`)과 종목명(`<sup>`) 추출
fn extract_symbol_and_name(cell: &ElementRef<'_>) -> Result<(String, String)> {
    let a_selector = selector("a")?;
    let sup_selector = selector("sup")?;

    let symbol = cell
        .select(&a_selector)
        .next()
        .map(|a| cell_text(&a))
        .ok_or_else(|| DataError::parse("심볼 링크(<a>) 없음"))?;
    let name = cell
        .select(&sup_selector)
        .next()
        .map(|sup| cell_text(&sup))
        .ok_or_else(|| DataError::parse("종목명(<sup>) 없음"))?;

    Ok((symbol, name))
}

/// 가격 셀 파싱: "1,234.56 USD" -> (1234.56, "USD")
fn parse_price_cell(text: &str) -> Result<(Decimal, String)> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [price_raw, currency] = tokens.as_slice() else {
        return Err(DataError::parse(format!("가격 셀 형식 오류: {:?}", text)));
    };

    let price = Decimal::from_str(&price_raw.replace(',', ""))
        .map_err(|_| DataError::parse(format!("가격 파싱 실패: {:?}", price_raw)))?;

    Ok((price, currency.to_string()))
}

/// 시가총액 셀 파싱: 끝의 통화 단위를 제거하고 남은 값이 없으면 None
///
/// "2.95 T USD" -> Some(2950000), "USD" -> None, "" -> None
fn parse_market_cap_cell(text: &str) -> Result<Option<Decimal>> {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.last().is_some_and(|t| is_unit_token(t)) {
        tokens.pop();
    }

    let remainder = tokens.concat();
    if remainder.is_empty() || PLACEHOLDER_DASHES.contains(&remainder.as_str()) {
        return Ok(None);
    }

    normalize_quantity(&remainder).map(Some)
}

/// 통화 코드 같은 단위 토큰 (알파벳 2자 이상)
fn is_unit_token(token: &str) -> bool {
    token.chars().count() >= 2 && token.chars().all(|c| c.is_ascii_alphabetic())
}

/// 섹터 셀 파싱: 자리표시 대시는 None, 그 외는 그대로
fn parse_sector_cell(text: &str) -> Option<String> {
    if PLACEHOLDER_DASHES.contains(&text) {
        None
    } else {
        Some(text.to_string())
    }
}
