//! 단계별 진단 출력.
//!
//! 각 컴포넌트는 생성 시 `Verbosity`를 전달받아 보관하고,
//! `info_if!` / `debug_if!` 매크로로 메시지를 내보냅니다.
//! 매크로는 레벨을 확인한 뒤 `tracing`으로 그대로 전달하므로
//! 구조화 필드를 그대로 사용할 수 있습니다.
//!
//! ```rust,ignore
//! info_if!(self.verbosity, count = rows.len(), "수집 완료");
//! debug_if!(self.verbosity, url = %url, "페이지 요청");
//! ```

use tracing::level_filters::LevelFilter;

/// 진단 출력 레벨 (Silent < Info < Debug)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// 출력 없음
    Silent,
    /// INFO 메시지만
    #[default]
    Info,
    /// INFO + DEBUG 메시지
    Debug,
}

impl Verbosity {
    /// CLI 플래그 조합에서 레벨 결정 (quiet가 verbose보다 우선)
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::Silent
        } else if verbose {
            Self::Debug
        } else {
            Self::Info
        }
    }

    /// INFO 메시지 출력 여부
    pub fn info_enabled(self) -> bool {
        self >= Self::Info
    }

    /// DEBUG 메시지 출력 여부
    pub fn debug_enabled(self) -> bool {
        self >= Self::Debug
    }

    /// tracing subscriber 필터 레벨
    ///
    /// Silent에서도 치명적 오류는 보이도록 ERROR는 남겨둡니다.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Silent => LevelFilter::ERROR,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
        }
    }
}

/// `Verbosity`가 INFO 이상일 때만 `tracing::info!` 실행
#[macro_export]
macro_rules! info_if {
    ($verbosity:expr, $($arg:tt)+) => {
        if $crate::verbosity::Verbosity::info_enabled($verbosity) {
            ::tracing::info!($($arg)+);
        }
    };
}

/// `Verbosity`가 DEBUG일 때만 `tracing::debug!` 실행
#[macro_export]
macro_rules! debug_if {
    ($verbosity:expr, $($arg:tt)+) => {
        if $crate::verbosity::Verbosity::debug_enabled($verbosity) {
            ::tracing::debug!($($arg)+);
        }
    };
}
