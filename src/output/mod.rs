pub mod formatter;

pub use formatter::{
    format_assessment_list, format_history, format_outcome, score_bar, should_use_colors,
    truncate_text,
};
