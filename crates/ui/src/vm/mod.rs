mod activity_vm;
mod week_vm;

pub use activity_vm::{ActivityVm, PromptVm, fallback_activities, map_activities, prompt_vm};
pub use week_vm::{DayCellVm, SummaryVm, WeekVm, week_vm};
