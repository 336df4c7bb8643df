//! Text helpers for prompt and script rendering.

/// Marker phrases separating a weekly prompt's main question from its
/// hints block, checked in order. The generator has produced each of
/// these over time.
pub const HINT_MARKERS: &[&str] = &[
    "Consider the following hints:",
    "Here are some hints to consider:",
    "Some hints to get you started:",
    "Hints:",
];

/// A weekly prompt split into its main question and optional hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptParts {
    pub main: String,
    pub hints: Option<String>,
}

/// Split prompt text at the first marker phrase found, scanning the
/// marker list in order. The hints block keeps the marker itself.
#[must_use]
pub fn split_prompt(text: &str) -> PromptParts {
    for marker in HINT_MARKERS {
        if let Some(pos) = text.find(marker) {
            return PromptParts {
                main: text[..pos].trim().to_string(),
                hints: Some(text[pos..].trim().to_string()),
            };
        }
    }
    PromptParts {
        main: text.trim().to_string(),
        hints: None,
    }
}

/// Split script text into paragraphs on blank-line boundaries.
///
/// Lines containing only whitespace count as blank; runs of blank
/// lines produce a single break.
#[must_use]
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}
