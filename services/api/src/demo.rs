use crate::commands::to_pretty_json;
use crate::infra::{load_engine, sample_response_set, InMemoryResponseStore};
use chrono::Utc;
use clap::Args;
use insightme::assessment::report::views::AssessmentInsights;
use insightme::assessment::{AnalysisSettings, AssessmentAnalysis, AssessmentService, Unscored};
use insightme::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Number of strengths and weaknesses to list
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
    /// Print the analysis as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let mut settings = AnalysisSettings::default();
    if let Some(top_n) = args.top_n {
        settings.top_n = top_n;
    }

    let engine = load_engine(None)?;
    let store = Arc::new(InMemoryResponseStore::default());
    let service = AssessmentService::new(engine, store, settings);

    let sample = sample_response_set("demo-user", "general");
    let (set, _) = service.submit(&sample.user_id, &sample.assessment_name, sample.responses)?;
    let report = service.report(&set.user_id, &set.assessment_name, Utc::now())?;

    if args.json {
        let payload = serde_json::json!({
            "user_id": set.user_id,
            "assessment_name": set.assessment_name,
            "analysis": report.analysis,
            "insights": report.summary().insights(),
        });
        println!("{}", to_pretty_json(&payload)?);
        return Ok(());
    }

    println!("InsightMe demo");
    println!(
        "Scored {} sample answers for '{}' against the built-in catalog\n",
        set.responses.len(),
        set.user_id
    );
    render_analysis(&report.analysis);
    render_insights(&report.summary().insights());

    Ok(())
}

pub(crate) fn render_analysis(analysis: &AssessmentAnalysis) {
    println!("Dimension scores");
    if analysis.overall_scores.is_empty() {
        println!("  (no scored answers)");
    }
    let mut ranked: Vec<(&String, &f64)> = analysis.overall_scores.iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (dimension, score) in ranked {
        println!("  {dimension:<28} {score:>5.2}");
    }

    println!("\nStrengths");
    for (dimension, score) in &analysis.strengths_weaknesses.strengths {
        println!("  + {dimension} ({score:.2})");
    }
    println!("Growth areas");
    for (dimension, score) in &analysis.strengths_weaknesses.weaknesses {
        println!("  - {dimension} ({score:.2})");
    }

    if !analysis.value_proportions.is_empty() {
        println!("\nCore values");
        for (value, percent) in &analysis.value_proportions {
            println!("  {value:<28} {percent:>5.1}%");
        }
    }

    if !analysis.motivation_trends.is_empty() {
        println!("\nMotivation trends");
        for (dimension, score) in &analysis.motivation_trends {
            println!("  {dimension:<28} {score:>5.2}");
        }
    }

    if !analysis.open_ended.is_empty() {
        println!("\nOpen-ended responses");
        for response in &analysis.open_ended {
            println!("  {}", response.question_text);
            println!("    > {}", response.answer);
        }
    }

    let coverage = &analysis.coverage;
    println!(
        "\nCoverage: {} of {} answers scored",
        coverage.scored, coverage.total
    );
    for reason in Unscored::ordered() {
        if let Some(count) = coverage.unscored.get(&reason) {
            println!("  {}: {count}", reason.label());
        }
    }
}

fn render_insights(insights: &AssessmentInsights) {
    println!("\nReadiness: {}", insights.readiness_level.label());
    for observation in &insights.observations {
        println!("  * {observation}");
    }
    if !insights.recommended_actions.is_empty() {
        println!("Next steps");
        for action in &insights.recommended_actions {
            println!("  -> {action}");
        }
    }
}
