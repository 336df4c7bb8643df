mod activity;
mod audio;
mod completion;
mod progress;

pub use activity::{ActivityDefinition, ActivityId, ActivityKind, Roadmap};
pub use audio::{AudioVariant, Provider, Voice};
pub use completion::{AnnotatedDay, CompletedDays, CompletionEntry};
pub use progress::{
    ExpressionsProgress, JournalingProgress, PodcastProgress, ProgressDocument, PromptProgress,
    ScriptSlot, ShadowingProgress, WeekRecord, WeeklySummary,
};
