use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{ActivityId, AudioVariant, CompletedDays, Provider};
use crate::week::WeekKey;

/// The full progress document fetched from the server. The server owns
/// the authoritative copy; the client only ever replaces this wholesale
/// after a confirmed mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProgressDocument {
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub weeks: BTreeMap<WeekKey, WeekRecord>,
}

impl ProgressDocument {
    #[must_use]
    pub fn week(&self, key: &WeekKey) -> Option<&WeekRecord> {
        self.weeks.get(key)
    }
}

/// Per-week progress across all five activities. The server creates
/// records lazily, so every slice defaults to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WeekRecord {
    #[serde(default)]
    pub weekly_expressions: ExpressionsProgress,
    #[serde(default)]
    pub voice_journaling: JournalingProgress,
    #[serde(default)]
    pub shadowing_practice: ShadowingProgress,
    #[serde(default)]
    pub weekly_speaking_prompt: PromptProgress,
    #[serde(default)]
    pub podcast_shadowing: PodcastProgress,
}

impl WeekRecord {
    #[must_use]
    pub fn completed_days(&self, id: ActivityId) -> &CompletedDays {
        match id {
            ActivityId::WeeklyExpressions => &self.weekly_expressions.completed_days,
            ActivityId::VoiceJournaling => &self.voice_journaling.completed_days,
            ActivityId::ShadowingPractice => &self.shadowing_practice.completed_days,
            ActivityId::WeeklySpeakingPrompt => &self.weekly_speaking_prompt.completed_days,
            ActivityId::PodcastShadowing => &self.podcast_shadowing.completed_days,
        }
    }

    /// Whether the activity has generated or assigned content yet.
    /// Gates the journaling kebab menu and the player placeholders.
    #[must_use]
    pub fn has_content(&self, id: ActivityId) -> bool {
        match id {
            ActivityId::WeeklyExpressions => !self.weekly_expressions.mp3_file.is_empty(),
            ActivityId::VoiceJournaling => !self.voice_journaling.topics.is_empty(),
            ActivityId::ShadowingPractice => {
                !self.shadowing_practice.slot_script(ScriptSlot::One).is_empty()
            }
            ActivityId::WeeklySpeakingPrompt => !self.weekly_speaking_prompt.prompt.is_empty(),
            ActivityId::PodcastShadowing => !self.podcast_shadowing.audio_file.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct JournalingProgress {
    #[serde(default)]
    pub completed_days: CompletedDays,
    /// Generated discussion topics, revealed per day in the detail panel.
    #[serde(default)]
    pub topics: Vec<String>,
}

/// One of the two independent script/audio pairs within shadowing
/// practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptSlot {
    One,
    Two,
}

impl ScriptSlot {
    pub const ALL: [ScriptSlot; 2] = [ScriptSlot::One, ScriptSlot::Two];

    #[must_use]
    pub fn number(&self) -> u8 {
        match self {
            ScriptSlot::One => 1,
            ScriptSlot::Two => 2,
        }
    }

    #[must_use]
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(ScriptSlot::One),
            2 => Some(ScriptSlot::Two),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ShadowingProgress {
    #[serde(default)]
    pub completed_days: CompletedDays,
    /// Legacy single-slot script field from before slots existed.
    #[serde(default)]
    pub script: String,
    #[serde(default)]
    pub script_1: String,
    #[serde(default)]
    pub script_2: String,
    #[serde(default)]
    pub audio_1: BTreeMap<Provider, AudioVariant>,
    #[serde(default)]
    pub audio_2: BTreeMap<Provider, AudioVariant>,
}

impl ShadowingProgress {
    /// Script text for a slot; slot 1 falls back to the legacy field.
    #[must_use]
    pub fn slot_script(&self, slot: ScriptSlot) -> &str {
        match slot {
            ScriptSlot::One => {
                if self.script_1.is_empty() {
                    &self.script
                } else {
                    &self.script_1
                }
            }
            ScriptSlot::Two => &self.script_2,
        }
    }

    #[must_use]
    pub fn slot_audio(&self, slot: ScriptSlot) -> &BTreeMap<Provider, AudioVariant> {
        match slot {
            ScriptSlot::One => &self.audio_1,
            ScriptSlot::Two => &self.audio_2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PromptProgress {
    #[serde(default)]
    pub completed_days: CompletedDays,
    /// Main question plus optional hints suffix; split client-side.
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExpressionsProgress {
    #[serde(default)]
    pub completed_days: CompletedDays,
    /// Audio filename the server assigned to this week.
    #[serde(default)]
    pub mp3_file: String,
    /// Free-text notes per day.
    #[serde(default)]
    pub notes: BTreeMap<NaiveDate, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PodcastProgress {
    #[serde(default)]
    pub completed_days: CompletedDays,
    #[serde(default)]
    pub audio_file: String,
    #[serde(default)]
    pub episode_name: String,
    #[serde(default)]
    pub chapter_name: String,
    #[serde(default)]
    pub transcript_file: String,
    /// Separately generated narration track.
    #[serde(default)]
    pub typecast_audio_url: String,
}

/// Server-derived weekly counts. Recomputed server-side after every
/// mutation; the client renders it and never computes its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WeeklySummary {
    #[serde(default)]
    pub week_key: String,
    #[serde(default)]
    pub weekly_expressions_days: u32,
    #[serde(default)]
    pub voice_journaling_days: u32,
    #[serde(default)]
    pub shadowing_practice_days: u32,
    #[serde(default)]
    pub weekly_speaking_prompt_days: u32,
    #[serde(default)]
    pub podcast_shadowing_days: u32,
    #[serde(default)]
    pub total_activities: u32,
    #[serde(default)]
    pub completed_activities: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CompletionEntry;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn week_record_deserializes_with_missing_slices() {
        let record: WeekRecord = serde_json::from_str(
            r#"{"voice_journaling": {"completed_days": ["2024-01-08"], "topics": ["Routines"]}}"#,
        )
        .unwrap();
        assert!(record.has_content(ActivityId::VoiceJournaling));
        assert!(!record.has_content(ActivityId::PodcastShadowing));
        assert!(record
            .completed_days(ActivityId::VoiceJournaling)
            .contains_day(date("2024-01-08")));
        assert!(record.completed_days(ActivityId::ShadowingPractice).is_empty());
    }

    #[test]
    fn slot_one_falls_back_to_legacy_script() {
        let legacy = ShadowingProgress {
            script: "Old single script.".into(),
            ..ShadowingProgress::default()
        };
        assert_eq!(legacy.slot_script(ScriptSlot::One), "Old single script.");
        assert!(legacy.slot_script(ScriptSlot::Two).is_empty());

        let slotted = ShadowingProgress {
            script: "Old single script.".into(),
            script_1: "New slot one.".into(),
            ..ShadowingProgress::default()
        };
        assert_eq!(slotted.slot_script(ScriptSlot::One), "New slot one.");
    }

    #[test]
    fn provider_keyed_audio_round_trips() {
        let mut shadowing = ShadowingProgress::default();
        shadowing.audio_1.insert(
            Provider::Typecast,
            AudioVariant {
                url: "audio/2024-W01_s1_typecast.mp3".into(),
                voice_id: "tc_olivia".into(),
                voice_name: "Olivia".into(),
                model: "ssfm-v21".into(),
                speed: 1.2,
            },
        );
        let json = serde_json::to_string(&shadowing).unwrap();
        let back: ShadowingProgress = serde_json::from_str(&json).unwrap();
        let variant = back.slot_audio(ScriptSlot::One).get(&Provider::Typecast).unwrap();
        assert_eq!(variant.voice_name, "Olivia");
        assert!(back.slot_audio(ScriptSlot::One).get(&Provider::Openai).is_none());
    }

    #[test]
    fn document_weeks_are_keyed_by_week_key() {
        let mut doc = ProgressDocument::default();
        let key: WeekKey = "2024-W01".parse().unwrap();
        let mut record = WeekRecord::default();
        record
            .weekly_expressions
            .completed_days
            .mark(CompletionEntry::Simple(date("2024-01-07")));
        doc.weeks.insert(key, record);

        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"2024-W01\""));
        let back: ProgressDocument = serde_json::from_str(&json).unwrap();
        assert!(back.week(&key).is_some());
    }
}
