//! CSV 저장소.
//!
//! - `countries`: 국가 목록 파일 (`countries.csv`)
//! - `results`: 수집 결과 파일 (`results.csv`)

pub mod countries;
pub mod results;

use std::fs;
use std::path::{Path, PathBuf};

use crate::{DataError, Result};

pub use countries::{load_country_list, write_country_list, COUNTRY_LIST_FILE, COUNTRY_LIST_HEADER};
pub use results::{ResultSink, RESULTS_FILE, RESULTS_HEADER};

/// 디렉토리가 없으면 생성, 파일이면 오류
pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(DataError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// 명시된 경로가 존재하는 디렉토리인지 확인
pub fn check_directory(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        return Err(DataError::PathNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(DataError::NotADirectory(dir.to_path_buf()));
    }
    Ok(dir.to_path_buf())
}

/// 출력 디렉토리 결정.
///
/// 명시된 경로는 반드시 존재하는 디렉토리여야 하고,
/// 없으면 기본 데이터 디렉토리를 (필요 시 생성하여) 사용합니다.
pub fn resolve_output_dir(explicit: Option<&Path>, default_dir: &Path) -> Result<PathBuf> {
    match explicit {
        Some(dir) => check_directory(dir),
        None => {
            ensure_directory(default_dir)?;
            Ok(default_dir.to_path_buf())
        }
    }
}
