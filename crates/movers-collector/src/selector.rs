//! 터미널 국가 선택기.
//!
//! 탐색된 국가를 `지역 / 국가` 체크리스트로 보여주고 체크된 항목만 원래 순서대로 돌려줍니다.
//! 처음에는 모든 항목이 체크되어 있습니다.

use dialoguer::MultiSelect;

use movers_data::{CountryEntry, DataError, Result, SelectionProvider};

/// `dialoguer` 기반 대화형 선택 Provider
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSelector;

impl SelectionProvider for TerminalSelector {
    fn name(&self) -> &str {
        "terminal"
    }

    fn select(&self, candidates: Vec<CountryEntry>) -> Result<Vec<CountryEntry>> {
        if candidates.is_empty() {
            return Ok(candidates);
        }

        let labels: Vec<String> = candidates.iter().map(label).collect();
        let defaults = vec![true; labels.len()];

        let picked = MultiSelect::new()
            .with_prompt("조회할 국가 선택 (space: 선택/해제, enter: 확인)")
            .items(&labels)
            .defaults(&defaults)
            .interact_opt()
            .map_err(|e| DataError::SelectionError(e.to_string()))?
            .ok_or_else(|| DataError::SelectionError("국가 선택이 취소되었습니다".to_string()))?;

        Ok(keep_checked(candidates, &picked))
    }
}

fn label(entry: &CountryEntry) -> String {
    format!("{} / {}", entry.region, entry.country)
}

/// 체크된 인덱스의 항목만 원래 순서대로 유지
fn keep_checked(candidates: Vec<CountryEntry>, checked: &[usize]) -> Vec<CountryEntry> {
    candidates
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| checked.contains(idx))
        .map(|(_, entry)| entry)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<CountryEntry> {
        vec![
            CountryEntry::new("North America", "USA", "stocks-usa"),
            CountryEntry::new("Europe", "Germany", "stocks-germany"),
            CountryEntry::new("Asia", "Japan", "stocks-japan"),
        ]
    }

    #[test]
    fn test_label() {
        assert_eq!(label(&candidates()[1]), "Europe / Germany");
    }

    #[test]
    fn test_keep_checked_preserves_order() {
        let kept = keep_checked(candidates(), &[2, 0]);
        let names: Vec<&str> = kept.iter().map(|e| e.country.as_str()).collect();
        assert_eq!(names, vec!["USA", "Japan"]);
    }

    #[test]
    fn test_empty_selection_is_allowed() {
        assert!(keep_checked(candidates(), &[]).is_empty());
        assert!(TerminalSelector.select(Vec::new()).unwrap().is_empty());
    }
}
