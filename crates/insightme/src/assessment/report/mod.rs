mod html;
mod insights;
mod summary;
pub mod views;

pub use html::{render_html, report_file_name};
pub use summary::AssessmentReport;

pub(crate) use insights::generate_insights;
