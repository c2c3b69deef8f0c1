//! Info panel presentation.

use serde::{Deserialize, Serialize};

use crate::models::{ContentCatalog, Topic};

/// Closing line of the overview panel.
pub const OVERVIEW_PROMPT: &str =
    "Select an AI type below to explore its specific impact on corporate finance.";

/// Which kind of entry a panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Overview,
    Layer,
}

/// Display structure of the info panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelView {
    pub kind: PanelKind,
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub facts: Vec<String>,
    /// Function / use-case labels; empty for the overview.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub functions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// A run of fact text, emphasized or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub emphasized: bool,
}

/// Turns catalog entries into panel views.
pub struct InfoPanelPresenter;

impl InfoPanelPresenter {
    pub fn present(catalog: &ContentCatalog, topic: Topic) -> PanelView {
        match topic {
            Topic::Overview => {
                let overview = catalog.overview();
                PanelView {
                    kind: PanelKind::Overview,
                    headline: overview.headline.clone(),
                    description: None,
                    facts: overview.stats.clone(),
                    functions: Vec::new(),
                    prompt: Some(OVERVIEW_PROMPT.to_string()),
                }
            }
            Topic::Layer(layer) => {
                let entry = catalog.layer(layer);
                PanelView {
                    kind: PanelKind::Layer,
                    headline: entry.headline.clone(),
                    description: Some(entry.description.clone()),
                    facts: entry.stats.clone(),
                    functions: entry.functions.clone(),
                    prompt: None,
                }
            }
        }
    }
}

impl PanelView {
    /// Plain-text rendering with emphasis markers removed.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.headline);
        out.push('\n');

        if let Some(description) = &self.description {
            out.push('\n');
            out.push_str(description);
            out.push('\n');
        }

        if !self.facts.is_empty() {
            out.push('\n');
            for fact in &self.facts {
                out.push_str("• ");
                for span in emphasis_spans(fact) {
                    out.push_str(span.text);
                }
                out.push('\n');
            }
        }

        if !self.functions.is_empty() {
            out.push_str("\nKey functions:\n");
            for function in &self.functions {
                out.push_str("  - ");
                out.push_str(function);
                out.push('\n');
            }
        }

        if let Some(prompt) = &self.prompt {
            out.push('\n');
            out.push_str(prompt);
            out.push('\n');
        }

        out
    }
}

/// Split `**bold**` markers into spans. An unmatched trailing marker is kept
/// as literal text.
pub fn emphasis_spans(text: &str) -> Vec<Span<'_>> {
    let parts: Vec<&str> = text.split("**").collect();
    let balanced = parts.len() % 2 == 1;
    let mut spans = Vec::with_capacity(parts.len());

    for (idx, part) in parts.iter().enumerate() {
        let emphasized = idx % 2 == 1;
        if emphasized && !balanced && idx == parts.len() - 1 {
            spans.push(Span {
                text: "**",
                emphasized: false,
            });
            spans.push(Span {
                text: part,
                emphasized: false,
            });
            continue;
        }
        if !part.is_empty() {
            spans.push(Span {
                text: part,
                emphasized,
            });
        }
    }
    spans
}
