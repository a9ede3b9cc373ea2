//! 국가 목록 파일.
//!
//! 헤더: `Region,Country,URLToken`. 이전 버전이 쓴 `Continent` 헤더도 읽습니다.

use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::{CountryEntry, DataError, Result};

/// 기본 국가 목록 파일명
pub const COUNTRY_LIST_FILE: &str = "countries.csv";

/// 국가 목록 헤더
pub const COUNTRY_LIST_HEADER: [&str; 3] = ["Region", "Country", "URLToken"];

/// 첫 번째 컬럼의 이전 이름
const LEGACY_REGION_HEADER: &str = "Continent";

/// 국가 목록 저장 (기존 내용 덮어씀)
pub fn write_country_list(path: &Path, entries: &[CountryEntry]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_path(path)?;

    wtr.write_record(COUNTRY_LIST_HEADER)?;
    for entry in entries {
        wtr.serialize(entry)?;
    }
    wtr.flush()?;

    Ok(())
}

/// 국가 목록 로드 (헤더 형식 검증)
pub fn load_country_list(path: &Path) -> Result<Vec<CountryEntry>> {
    if !path.exists() {
        return Err(DataError::PathNotFound(path.to_path_buf()));
    }

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = rdr.headers()?.clone();
    validate_header(&headers)?;

    let mut entries = Vec::new();
    for (line, record) in rdr.deserialize::<CountryEntry>().enumerate() {
        let entry = record.map_err(|e| {
            DataError::parse(format!("국가 목록 {}행 오류: {}", line + 2, e))
        })?;
        entries.push(entry);
    }

    Ok(entries)
}

fn validate_header(headers: &csv::StringRecord) -> Result<()> {
    let fields: Vec<&str> = headers.iter().collect();
    let valid = fields.len() == COUNTRY_LIST_HEADER.len()
        && (fields[0] == COUNTRY_LIST_HEADER[0] || fields[0] == LEGACY_REGION_HEADER)
        && fields[1..] == COUNTRY_LIST_HEADER[1..];

    if valid {
        Ok(())
    } else {
        Err(DataError::parse(format!(
            "국가 목록 헤더 형식 오류: {:?} (기대값: {:?})",
            fields, COUNTRY_LIST_HEADER
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample() -> Vec<CountryEntry> {
        vec![
            CountryEntry::new("North America", "USA", "stocks-usa"),
            CountryEntry::new("Europe", "Germany", "stocks-germany"),
            CountryEntry::new("Middle East / Africa", "Côte d'Ivoire", "stocks-ivory-coast"),
            CountryEntry::new("Asia", "Korea, Republic of", "stocks-korea"),
        ]
    }

    #[test]
    fn test_write_then_load_preserves_order() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(COUNTRY_LIST_FILE);

        write_country_list(&path, &sample()).unwrap();
        let loaded = load_country_list(&path).unwrap();

        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_header_is_written_for_empty_list() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(COUNTRY_LIST_FILE);

        write_country_list(&path, &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "Region,Country,URLToken");
        assert!(load_country_list(&path).unwrap().is_empty());
    }

    #[test]
    fn test_overwrites_previous_content() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(COUNTRY_LIST_FILE);

        write_country_list(&path, &sample()).unwrap();
        write_country_list(&path, &sample()[..1]).unwrap();

        assert_eq!(load_country_list(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_legacy_continent_header() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("legacy.csv");
        fs::write(&path, "Continent,Country,URLToken\nAsia,Japan,stocks-japan\n").unwrap();

        let loaded = load_country_list(&path).unwrap();

        assert_eq!(loaded, vec![CountryEntry::new("Asia", "Japan", "stocks-japan")]);
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.csv");
        fs::write(&path, "Symbol,Name\nAAPL,Apple\n").unwrap();

        assert!(matches!(
            load_country_list(&path),
            Err(DataError::ParseError(_))
        ));
    }

    #[test]
    fn test_short_row_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("short.csv");
        fs::write(&path, "Region,Country,URLToken\nAsia,Japan\n").unwrap();

        assert!(load_country_list(&path).is_err());
    }

    #[test]
    fn test_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_country_list(&tmp.path().join("nope.csv")),
            Err(DataError::PathNotFound(_))
        ));
    }
}
