use crate::demo::render_analysis;
use crate::infra::{load_engine, load_responses_file};
use chrono::Utc;
use clap::Args;
use insightme::assessment::{AssessmentReport, AssessmentService, Response, ResponseImporter};
use insightme::config::AppConfig;
use insightme::error::AppError;
use insightme::storage::FileResponseStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

const DEFAULT_ASSESSMENT: &str = "general";

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Response file: a JSON array, a stored response set, or a CSV export
    #[arg(long)]
    pub(crate) responses: Option<PathBuf>,
    /// Score the latest stored set for this user instead of a file
    #[arg(long)]
    pub(crate) user: Option<String>,
    /// Assessment name used for stored lookups
    #[arg(long, default_value = DEFAULT_ASSESSMENT)]
    pub(crate) assessment: String,
    /// Question catalog JSON (defaults to APP_CATALOG_PATH or the built-in catalog)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Number of strengths and weaknesses to list
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
    /// Print the analysis as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// User the report is written for
    #[arg(long)]
    pub(crate) user: String,
    /// Assessment name used for stored lookups
    #[arg(long, default_value = DEFAULT_ASSESSMENT)]
    pub(crate) assessment: String,
    /// Response file to report on instead of the latest stored set
    #[arg(long)]
    pub(crate) responses: Option<PathBuf>,
    /// Question catalog JSON (defaults to APP_CATALOG_PATH or the built-in catalog)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Directory for the HTML file (defaults to APP_REPORT_DIR)
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// CSV export with question_id and answer columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// User the answers belong to
    #[arg(long)]
    pub(crate) user: String,
    /// Assessment name to store the set under
    #[arg(long, default_value = DEFAULT_ASSESSMENT)]
    pub(crate) assessment: String,
}

fn build_service(
    config: &AppConfig,
    catalog: Option<PathBuf>,
) -> Result<AssessmentService<FileResponseStore>, AppError> {
    let catalog_path = catalog.or_else(|| config.storage.catalog_path.clone());
    let engine = load_engine(catalog_path.as_deref())?;
    let store = Arc::new(FileResponseStore::new(config.storage.data_dir.clone()));
    Ok(AssessmentService::new(engine, store, config.analysis.clone()))
}

fn resolve_responses(
    service: &AssessmentService<FileResponseStore>,
    file: Option<PathBuf>,
    user: Option<&str>,
    assessment: &str,
) -> Result<Vec<Response>, AppError> {
    match (file, user) {
        (Some(path), _) => load_responses_file(&path),
        (None, Some(user)) => Ok(service.latest_set(user, assessment)?.responses),
        (None, None) => Err(AppError::Usage(
            "pass --responses <file> or --user <id>".to_string(),
        )),
    }
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config, args.catalog)?;
    let responses = resolve_responses(
        &service,
        args.responses,
        args.user.as_deref(),
        &args.assessment,
    )?;

    let analysis = match args.top_n {
        Some(top_n) => service.analyze_with_top_n(&responses, top_n),
        None => service.analyze(&responses),
    };

    if args.json {
        println!("{}", to_pretty_json(&analysis)?);
    } else {
        render_analysis(&analysis);
    }
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config, args.catalog)?;
    let now = Utc::now();

    let report = match args.responses {
        Some(path) => {
            let responses = load_responses_file(&path)?;
            AssessmentReport::new(args.user.as_str(), now, service.analyze(&responses))
        }
        None => service.report(&args.user, &args.assessment, now)?,
    };

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| config.storage.report_dir.clone());
    std::fs::create_dir_all(&output_dir)?;
    let path = output_dir.join(report.file_name());
    std::fs::write(&path, report.render_html())?;

    info!(path = %path.display(), "report written");
    println!("{}", path.display());
    Ok(())
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config, None)?;
    let responses = ResponseImporter::from_path(&args.csv)?;

    let (set, stored) = service.submit(&args.user, &args.assessment, responses)?;
    let location = stored
        .location
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    println!(
        "Stored {} responses for '{}' ({}) at {location}",
        set.responses.len(),
        set.user_id,
        set.assessment_name
    );
    Ok(())
}

pub(crate) fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}
