use practice_core::model::{ActivityId, Roadmap};
use practice_core::prompt::split_prompt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityVm {
    pub id: ActivityId,
    pub title: String,
    pub target_length: Option<String>,
}

/// Cards render from the roadmap catalog when it has loaded; activities
/// the catalog does not name fall back to their built-in titles.
#[must_use]
pub fn map_activities(roadmap: &Roadmap) -> Vec<ActivityVm> {
    ActivityId::ALL
        .iter()
        .map(|&id| match roadmap.definition(id) {
            Some(def) => ActivityVm {
                id,
                title: def.title.clone(),
                target_length: def.target_length.clone(),
            },
            None => fallback_activity(id),
        })
        .collect()
}

#[must_use]
pub fn fallback_activities() -> Vec<ActivityVm> {
    ActivityId::ALL.iter().map(|&id| fallback_activity(id)).collect()
}

fn fallback_activity(id: ActivityId) -> ActivityVm {
    ActivityVm {
        id,
        title: id.fallback_title().to_string(),
        target_length: None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptVm {
    pub main: String,
    pub hints: Option<String>,
}

#[must_use]
pub fn prompt_vm(prompt: &str) -> PromptVm {
    let parts = split_prompt(prompt);
    PromptVm {
        main: parts.main,
        hints: parts.hints,
    }
}
