pub mod formatter;

pub use formatter::{
    changed_extensions, format_authors, format_latency, format_pull_detail, format_repo_details,
    format_summary, format_timestamp, section_end, section_header, should_use_colors,
};
