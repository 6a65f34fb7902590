mod html;
mod quiz_vm;
mod results_vm;
mod time_fmt;

pub use html::sanitize_html;
pub use quiz_vm::{OptionVm, QuizVm, TIMER_WARNING_SECONDS, high_score_label};
pub use results_vm::{ResultRowVm, ResultsVm, map_results};
pub use time_fmt::{format_completed_at, format_countdown};
