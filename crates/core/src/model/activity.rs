use std::fmt;

use serde::{Deserialize, Serialize};

/// The five fixed practice activities tracked per week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityId {
    WeeklyExpressions,
    VoiceJournaling,
    ShadowingPractice,
    WeeklySpeakingPrompt,
    PodcastShadowing,
}

impl ActivityId {
    pub const ALL: [ActivityId; 5] = [
        ActivityId::WeeklyExpressions,
        ActivityId::VoiceJournaling,
        ActivityId::ShadowingPractice,
        ActivityId::WeeklySpeakingPrompt,
        ActivityId::PodcastShadowing,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityId::WeeklyExpressions => "weekly_expressions",
            ActivityId::VoiceJournaling => "voice_journaling",
            ActivityId::ShadowingPractice => "shadowing_practice",
            ActivityId::WeeklySpeakingPrompt => "weekly_speaking_prompt",
            ActivityId::PodcastShadowing => "podcast_shadowing",
        }
    }

    /// Fallback display title used until the roadmap catalog loads.
    #[must_use]
    pub fn fallback_title(&self) -> &'static str {
        match self {
            ActivityId::WeeklyExpressions => "Weekly expressions",
            ActivityId::VoiceJournaling => "Voice Journaling",
            ActivityId::ShadowingPractice => "Shadowing Practice",
            ActivityId::WeeklySpeakingPrompt => "Weekly Speaking Prompt",
            ActivityId::PodcastShadowing => "Podcast Shadowing",
        }
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    #[default]
    Daily,
}

/// One catalog entry from `GET /api/roadmap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDefinition {
    pub id: ActivityId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_length: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ActivityKind,
}

/// The phase-1 roadmap catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    pub phase: u32,
    pub title: String,
    pub duration: String,
    pub objective: String,
    pub activities: Vec<ActivityDefinition>,
}

impl Roadmap {
    #[must_use]
    pub fn definition(&self, id: ActivityId) -> Option<&ActivityDefinition> {
        self.activities.iter().find(|a| a.id == id)
    }
}
