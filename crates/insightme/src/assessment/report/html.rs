use super::views::{
    AssessmentInsights, AssessmentReportSummary, DimensionScoreEntry, ShareEntry,
};
use chrono::{DateTime, Datelike, Utc};
use html_escape::encode_text;
use std::fmt::Write;

const STYLE: &str = "\
body { font-family: 'Segoe UI', Arial, sans-serif; margin: 0; line-height: 1.6; background: #f8f9fa; color: #333; }
.container { max-width: 960px; margin: 30px auto; background: #fff; padding: 20px 40px; border-radius: 10px; }
header { text-align: center; border-bottom: 1px solid #e0e0e0; padding-bottom: 20px; }
header h1 { color: #007acc; }
.section { margin-bottom: 35px; padding: 20px; border: 1px solid #efefef; border-radius: 5px; }
.section h2 { color: #005a9e; border-bottom: 2px solid #007acc; padding-bottom: 8px; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid #eee; }
td.num { text-align: right; font-variant-numeric: tabular-nums; }
.question-text { font-weight: bold; color: #444; }
.answer-text { padding-left: 15px; font-style: italic; color: #555; }
footer { text-align: center; margin-top: 40px; font-size: 0.9em; color: #777; }";

/// `report_<user>_<YYYYmmddHHMM>.html`
pub fn report_file_name(user_id: &str, generated_at: DateTime<Utc>) -> String {
    format!("report_{user_id}_{}.html", generated_at.format("%Y%m%d%H%M"))
}

/// Standalone HTML document. Every user-supplied string is escaped.
pub fn render_html(summary: &AssessmentReportSummary, insights: &AssessmentInsights) -> String {
    let user = encode_text(&summary.user_id);
    let mut html = String::with_capacity(8 * 1024);

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>Self-Assessment Report - {user}</title>\n<style>\n{STYLE}\n</style>\n</head>\n\
         <body>\n<div class=\"container\">\n<header>\n<h1>Personal Self-Assessment Report</h1>\n\
         <p><strong>Participant:</strong> {user}</p>\n\
         <p><strong>Generated:</strong> {}</p>\n</header>\n",
        summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    html.push_str("<div class=\"section\">\n<h2>Overview of Dimensions</h2>\n");
    push_score_table(&mut html, &summary.dimension_scores, "Score");
    html.push_str("</div>\n");

    html.push_str("<div class=\"section\">\n<h2>Highlights</h2>\n");
    let _ = writeln!(
        html,
        "<p><strong>Readiness:</strong> {}{}</p>",
        insights.readiness_level.label(),
        insights
            .scored_pct
            .map(|pct| format!(" ({pct:.1}% of scorable answers scored)"))
            .unwrap_or_default()
    );
    push_ranked_list(&mut html, "Notable strengths", &summary.strengths, "No clear strengths yet.");
    push_ranked_list(
        &mut html,
        "Areas to develop",
        &summary.weaknesses,
        "No clear growth areas yet.",
    );
    push_text_list(&mut html, "Observations", &insights.observations);
    push_text_list(&mut html, "Suggested next steps", &insights.recommended_actions);
    html.push_str("</div>\n");

    html.push_str("<div class=\"section\">\n<h2>Core Values</h2>\n");
    push_share_table(&mut html, &summary.value_proportions);
    html.push_str("</div>\n");

    html.push_str("<div class=\"section\">\n<h2>Motivation Trends</h2>\n");
    push_score_table(&mut html, &summary.motivation_trends, "Score");
    html.push_str("</div>\n");

    html.push_str("<div class=\"section\">\n<h2>Open-Ended Responses</h2>\n");
    if summary.open_ended.is_empty() {
        html.push_str("<p>No open-ended responses.</p>\n");
    }
    for entry in &summary.open_ended {
        let _ = write!(
            html,
            "<div class=\"open-response-item\">\n<p class=\"question-text\">{}</p>\n\
             <p class=\"answer-text\">{}</p>\n</div>\n",
            encode_text(&entry.question_text),
            encode_text(&entry.answer)
        );
    }
    html.push_str("</div>\n");

    let _ = write!(
        html,
        "<footer>\n<p>&copy; {} InsightMe Self-Assessment System</p>\n</footer>\n</div>\n</body>\n</html>\n",
        summary.generated_at.year()
    );

    html
}

fn push_score_table(html: &mut String, entries: &[DimensionScoreEntry], column: &str) {
    if entries.is_empty() {
        html.push_str("<p>No data.</p>\n");
        return;
    }
    let _ = writeln!(
        html,
        "<table>\n<thead><tr><th>Dimension</th><th>{column}</th></tr></thead>\n<tbody>"
    );
    for entry in entries {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td class=\"num\">{:.2}</td></tr>",
            encode_text(&entry.dimension),
            entry.score
        );
    }
    html.push_str("</tbody>\n</table>\n");
}

fn push_share_table(html: &mut String, entries: &[ShareEntry]) {
    if entries.is_empty() {
        html.push_str("<p>No data.</p>\n");
        return;
    }
    html.push_str("<table>\n<thead><tr><th>Value</th><th>Share</th></tr></thead>\n<tbody>\n");
    for entry in entries {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td class=\"num\">{:.1}%</td></tr>",
            encode_text(&entry.label),
            entry.percent
        );
    }
    html.push_str("</tbody>\n</table>\n");
}

fn push_ranked_list(html: &mut String, title: &str, entries: &[DimensionScoreEntry], empty: &str) {
    let _ = writeln!(html, "<h3>{title}</h3>");
    if entries.is_empty() {
        let _ = writeln!(html, "<p>{empty}</p>");
        return;
    }
    html.push_str("<ul>\n");
    for entry in entries {
        let _ = writeln!(
            html,
            "<li>{}: {:.1}</li>",
            encode_text(&entry.dimension),
            entry.score
        );
    }
    html.push_str("</ul>\n");
}

fn push_text_list(html: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(html, "<h3>{title}</h3>\n<ul>");
    for item in items {
        let _ = writeln!(html, "<li>{}</li>", encode_text(item));
    }
    html.push_str("</ul>\n");
}
