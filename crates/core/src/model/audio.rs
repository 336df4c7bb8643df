use std::fmt;

use serde::{Deserialize, Serialize};

/// Third-party voice-synthesis backend. `typecast` is current;
/// `openai` variants linger in older weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Typecast,
    Openai,
}

impl Provider {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Typecast => "typecast",
            Provider::Openai => "openai",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated audio rendition of a script slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AudioVariant {
    /// Storage-relative URL of the audio file.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub voice_id: String,
    #[serde(default)]
    pub voice_name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default = "default_speed")]
    pub speed: f32,
}

fn default_speed() -> f32 {
    1.0
}

/// A selectable synthesis voice from `GET /api/voices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub voice_id: String,
    pub name: String,
}
