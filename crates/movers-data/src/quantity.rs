//! 단위 접미사 수량 정규화.
//!
//! 사이트는 거래량/시가총액을 `1.23K`, `45.6M`, `7.8B`, `1.2T` 형식으로 표시합니다.
//! 모든 값을 백만(M) 단위로 변환하여 규모가 다른 값도 바로 비교할 수 있게 합니다.
//!
//! | 접미사 | 배율 |
//! |---|---|
//! | K | × 0.001 |
//! | M | × 1 |
//! | B | × 1,000 |
//! | T | × 1,000,000 |
//!
//! 반올림은 하지 않습니다. 저장 전 `round_dp(STORAGE_SCALE)`은 호출자가 적용합니다.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{DataError, Result};

/// 저장 시 소수점 자릿수
pub const STORAGE_SCALE: u32 = 6;

/// 접미사별 백만 단위 배율
fn scale_factor(suffix: char) -> Option<Decimal> {
    match suffix {
        'K' => Some(Decimal::new(1, 3)),
        'M' => Some(Decimal::ONE),
        'B' => Some(Decimal::from(1_000)),
        'T' => Some(Decimal::from(1_000_000)),
        _ => None,
    }
}

/// 천 단위 구분자(쉼표, 유니코드 공백) 제거 및 유니코드 마이너스 치환
fn strip_grouping(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .map(|c| if c == '\u{2212}' { '-' } else { c })
        .collect()
}

/// 단위 접미사 수량을 백만 단위 `Decimal`로 변환합니다.
///
/// "1,234" -> 1234, "2.5M" -> 2.5, "3B" -> 3000, "1K" -> 0.001
pub fn normalize_quantity(raw: &str) -> Result<Decimal> {
    let cleaned = strip_grouping(raw);
    let fail = || DataError::NormalizationError {
        raw: raw.to_string(),
    };

    let (numeral, factor) = match cleaned.chars().last() {
        Some(last) => match scale_factor(last) {
            Some(factor) => (&cleaned[..cleaned.len() - last.len_utf8()], factor),
            None => (cleaned.as_str(), Decimal::ONE),
        },
        None => return Err(fail()),
    };

    let value = parse_numeral(numeral).ok_or_else(fail)?;
    value.checked_mul(factor).ok_or_else(fail)
}

/// 숫자 부분 파싱 (부호 허용, 지수 표기 허용)
///
/// `Decimal` 범위(유효 숫자 28~29자리, 약 ±7.9e28)를 넘는 값은 `None`이며
/// 호출자에서 `NormalizationError`가 됩니다.
fn parse_numeral(numeral: &str) -> Option<Decimal> {
    if numeral.is_empty() || numeral == "-" || numeral == "+" {
        return None;
    }
    let unsigned = numeral.strip_prefix('+').unwrap_or(numeral);
    Decimal::from_str(unsigned)
        .ok()
        .or_else(|| Decimal::from_scientific(unsigned).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_recognized_suffixes() {
        assert_eq!(normalize_quantity("1K").unwrap(), dec!(0.001));
        assert_eq!(normalize_quantity("2.5M").unwrap(), dec!(2.5));
        assert_eq!(normalize_quantity("3B").unwrap(), dec!(3000));
        assert_eq!(normalize_quantity("1T").unwrap(), dec!(1000000));
    }

    #[test]
    fn test_plain_numeral() {
        assert_eq!(normalize_quantity("1,234").unwrap(), dec!(1234));
        assert_eq!(normalize_quantity("0.75").unwrap(), dec!(0.75));
        assert_eq!(normalize_quantity("-12.5").unwrap(), dec!(-12.5));
    }

    #[test]
    fn test_site_spacing_and_minus() {
        // 숫자와 접미사 사이의 좁은 줄바꿈 없는 공백
        assert_eq!(normalize_quantity("45.6\u{202f}M").unwrap(), dec!(45.6));
        assert_eq!(normalize_quantity("1,234.5 K").unwrap(), dec!(1.2345));
        assert_eq!(normalize_quantity("\u{2212}3.2B").unwrap(), dec!(-3200));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(normalize_quantity("abc").is_err());
        assert!(normalize_quantity("").is_err());
        assert!(normalize_quantity("M").is_err());
        assert!(normalize_quantity("1.2X").is_err());
        assert!(normalize_quantity("—").is_err());

        match normalize_quantity("abc") {
            Err(DataError::NormalizationError { raw }) => assert_eq!(raw, "abc"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_out_of_decimal_range_is_rejected() {
        let raw = "123456789012345678901234567890";
        assert!(matches!(
            normalize_quantity(raw),
            Err(DataError::NormalizationError { .. })
        ));
        // 배율 적용 후 범위를 넘어도 실패
        assert!(normalize_quantity("79228162514264337593543950T").is_err());
        // 범위 안의 큰 값은 그대로
        assert_eq!(
            normalize_quantity("1,000,000,000,000").unwrap(),
            dec!(1000000000000)
        );
    }

    proptest! {
        #[test]
        fn prop_billions_are_thousand_millions(n in 0u32..1_000_000) {
            let billions = normalize_quantity(&format!("{}B", n)).unwrap();
            let millions = normalize_quantity(&format!("{}M", n)).unwrap();
            prop_assert_eq!(billions, millions * Decimal::from(1_000));
        }

        #[test]
        fn prop_grouping_is_ignored(n in 0u64..10_000_000_000) {
            let grouped = n
                .to_string()
                .as_bytes()
                .rchunks(3)
                .rev()
                .map(|c| std::str::from_utf8(c).unwrap())
                .collect::<Vec<_>>()
                .join(",");
            prop_assert_eq!(normalize_quantity(&grouped).unwrap(), Decimal::from(n));
        }
    }
}
