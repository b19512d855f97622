//! 报告：JSON / Markdown / HTML
mod html;
mod markdown;
mod report;

pub use html::{escape_html, render_html};
pub use markdown::{escape_pipes, render_markdown};
pub use report::{default_report_path, Report, ReportFormat, REPORT_DIR};
