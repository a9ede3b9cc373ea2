//! Market mover collector CLI.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movers_collector::{run_job, CollectorConfig, IterationScheduler, JobOptions, TerminalSelector};
use movers_data::{
    info_if, BrowserLauncher, CountryListProvider, CountrySource, HttpPageFetcher, Verbosity,
};

#[derive(Parser)]
#[command(name = "movers-collector")]
#[command(about = "Market mover collector", long_about = None)]
#[command(version)]
struct Cli {
    /// 디버그 출력
    #[arg(short, long)]
    verbose: bool,

    /// 출력 없음 (-v보다 우선)
    #[arg(short, long)]
    quiet: bool,

    /// 국가 목록 파일 (값 없이 주면 국가 탐색 후 대화형 선택)
    #[arg(short = 'c', long = "countries", value_name = "PATH", num_args = 0..=1)]
    countries: Option<Option<PathBuf>>,

    /// 전체 국가 탐색 후 사용 (-c 무시)
    #[arg(short = 'a', long = "all-countries")]
    all_countries: bool,

    /// 결과 파일 디렉토리 (존재하는 디렉토리여야 함)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// 반복 횟수
    #[arg(short, long, default_value_t = 1)]
    loops: u32,

    /// 반복 간 대기 시간 (분, 최소 5분)
    #[arg(short, long, value_name = "MINUTES", default_value_t = 0)]
    wait: u64,

    /// 샘플 시장(USA) 1회 수집, 디버그 출력 (다른 옵션 무시)
    #[arg(long)]
    testing: bool,
}

impl Cli {
    fn job_options(&self) -> JobOptions {
        if self.testing {
            return JobOptions::testing();
        }

        let source = match &self.countries {
            None => CountrySource::Default,
            Some(None) => CountrySource::Interactive,
            Some(Some(path)) => CountrySource::File(path.clone()),
        };

        JobOptions {
            source,
            all_countries: self.all_countries,
            output_dir: self.output.clone(),
            loops: self.loops,
            wait_minutes: self.wait,
            verbosity: Verbosity::from_flags(self.verbose, self.quiet),
        }
    }
}

#[cfg(feature = "browser")]
fn browser_launcher(config: &CollectorConfig) -> Arc<dyn BrowserLauncher> {
    Arc::new(movers_data::provider::ChromiumLauncher::new(config.browser.headless))
}

#[cfg(not(feature = "browser"))]
fn browser_launcher(_config: &CollectorConfig) -> Arc<dyn BrowserLauncher> {
    struct Unavailable;

    #[async_trait::async_trait]
    impl BrowserLauncher for Unavailable {
        async fn launch(&self) -> movers_data::Result<Box<dyn movers_data::BrowserSession>> {
            Err(movers_data::DataError::BrowserError(
                "browser feature 없이 빌드되어 국가 탐색을 할 수 없습니다".to_string(),
            ))
        }
    }

    Arc::new(Unavailable)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let options = cli.job_options();

    // 로깅 초기화 (RUST_LOG 우선)
    let level = options.verbosity.level_filter();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("movers_collector={0},movers_data={0}", level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info_if!(options.verbosity, "Market Mover Collector 시작");

    let config = CollectorConfig::from_env().context("설정 로드 실패")?;
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        base_url = %config.fetch.base_url,
        "설정 로드 완료"
    );

    let fetcher = HttpPageFetcher::with_config(&config.fetch.fetcher_config())
        .context("HTTP 클라이언트 생성 실패")?;
    let scheduler = IterationScheduler::new(fetcher, config.fetch.base_url.clone())
        .with_verbosity(options.verbosity);

    let countries = CountryListProvider::new(browser_launcher(&config), config.data_dir.clone())
        .with_selection(Arc::new(TerminalSelector))
        .with_base_url(config.fetch.base_url.clone())
        .with_menu_timeout(config.browser.menu_timeout())
        .with_verbosity(options.verbosity);

    let results_path = run_job(&countries, &scheduler, &config.data_dir, &options)
        .await
        .context("수집 작업 실패")?;

    info_if!(
        options.verbosity,
        path = %results_path.display(),
        "Market Mover Collector 종료"
    );

    Ok(())
}
