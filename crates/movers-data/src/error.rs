//! 데이터 모듈 오류 타입.

use std::path::PathBuf;

use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 경로가 존재하지 않음
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// 디렉토리가 아닌 경로
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// 페이지 구조/셀 파싱 오류 (마켓 테이블, 국가 메뉴, 국가 목록 파일)
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 단위 접미사 수량 정규화 실패
    #[error("Cannot normalize quantity: {raw:?}")]
    NormalizationError { raw: String },

    /// 페이지 가져오기 오류 (외부 소스)
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 브라우저 세션 오류
    #[error("Browser session error: {0}")]
    BrowserError(String),

    /// 국가 선택 오류
    #[error("Selection error: {0}")]
    SelectionError(String),

    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV 읽기/쓰기 오류
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl DataError {
    /// 파싱 오류 생성 헬퍼
    pub fn parse(msg: impl Into<String>) -> Self {
        DataError::ParseError(msg.into())
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        DataError::FetchError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::NotADirectory(PathBuf::from("results.csv"));
        assert_eq!(err.to_string(), "Not a directory: results.csv");

        let err = DataError::NormalizationError {
            raw: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot normalize quantity: \"abc\"");
    }
}
