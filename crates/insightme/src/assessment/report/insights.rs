use super::views::{AssessmentInsights, AssessmentReportSummary, ReadinessLevel};

const COMPLETE_SHARE: f64 = 0.9;
const PARTIAL_SHARE: f64 = 0.5;

pub(crate) fn generate_insights(summary: &AssessmentReportSummary) -> AssessmentInsights {
    let coverage = &summary.coverage;

    let readiness_level = match coverage.scored_share {
        Some(share) if share >= COMPLETE_SHARE => ReadinessLevel::Complete,
        Some(share) if share >= PARTIAL_SHARE => ReadinessLevel::Partial,
        _ => ReadinessLevel::Insufficient,
    };
    let scored_pct = coverage.scored_share.map(|share| (share * 1000.0).round() / 10.0);

    let top_strength = summary.strengths.first().map(|entry| entry.dimension.clone());
    let growth_area = summary
        .weaknesses
        .first()
        .filter(|entry| Some(&entry.dimension) != top_strength.as_ref())
        .map(|entry| entry.dimension.clone());
    let dominant_value = summary
        .value_proportions
        .first()
        .map(|entry| entry.label.clone());
    let dominant_motivation = summary
        .motivation_trends
        .first()
        .map(|entry| entry.dimension.clone());

    let mut observations = Vec::new();
    if let Some(pct) = scored_pct {
        observations.push(format!(
            "{} of {} scorable answers produced a score ({pct:.1}%)",
            coverage.scored, coverage.scorable
        ));
    }
    if let (Some(strength), Some(entry)) = (&top_strength, summary.strengths.first()) {
        observations.push(format!("Strongest dimension: {strength} ({:.2})", entry.score));
    }
    if let (Some(area), Some(entry)) = (&growth_area, summary.weaknesses.first()) {
        observations.push(format!("Lowest dimension: {area} ({:.2})", entry.score));
    }
    if let Some(entry) = summary.value_proportions.first() {
        observations.push(format!(
            "{} leads the core values at {:.1}%",
            entry.label, entry.percent
        ));
    }
    if let Some(entry) = summary.motivation_trends.first() {
        observations.push(format!(
            "{} is the strongest motivation driver ({:.2})",
            entry.dimension, entry.score
        ));
    }
    if !summary.open_ended.is_empty() {
        observations.push(format!(
            "{} reflection answer{} included",
            summary.open_ended.len(),
            if summary.open_ended.len() == 1 { "" } else { "s" }
        ));
    }

    let mut recommended_actions = Vec::new();
    match readiness_level {
        ReadinessLevel::Complete => {}
        ReadinessLevel::Partial => recommended_actions.push(
            "Answer the remaining scale questions before drawing firm conclusions".to_string(),
        ),
        ReadinessLevel::Insufficient => recommended_actions.push(
            "Too few answers were scored; retake the assessment for a reliable profile"
                .to_string(),
        ),
    }
    if let Some(strength) = &top_strength {
        recommended_actions.push(format!(
            "Look for weekly tasks that draw on {strength}"
        ));
    }
    if let Some(area) = &growth_area {
        recommended_actions.push(format!("Pick one small, concrete habit to build {area}"));
    }

    if observations.is_empty() {
        observations.push("No scored answers yet".to_string());
    }

    AssessmentInsights {
        readiness_level,
        scored_pct,
        top_strength,
        growth_area,
        dominant_value,
        dominant_motivation,
        observations,
        recommended_actions,
    }
}
