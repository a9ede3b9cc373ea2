//! 국가 선택 Provider.
//!
//! 탐색된 국가 목록을 사용자가 고른 부분집합으로 줄입니다.
//! 대화형 UI는 한 가지 구현일 뿐이며, core는 특정 UI에 의존하지 않습니다.

use crate::{CountryEntry, Result};

/// 국가 선택 capability
pub trait SelectionProvider: Send + Sync {
    /// Provider 이름
    fn name(&self) -> &str;

    /// 후보 목록에서 선택된 항목만 원래 순서대로 반환
    fn select(&self, candidates: Vec<CountryEntry>) -> Result<Vec<CountryEntry>>;
}

/// 모든 후보를 그대로 선택
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl SelectionProvider for AcceptAll {
    fn name(&self) -> &str {
        "accept-all"
    }

    fn select(&self, candidates: Vec<CountryEntry>) -> Result<Vec<CountryEntry>> {
        Ok(candidates)
    }
}
