//! Settings and seed data the server embeds in the page around the form.
//!
//! ```html
//! <meta name="csrf-token" content="...">
//! <meta name="plan-form-config" content='{"max_duration": 1440, "reorder": false}'>
//! <script type="application/json" id="plan-draft">{"plan_date": "2026-10-20", "sites": []}</script>
//! ```
//!
//! Anything missing or malformed falls back to defaults.

use anyhow::Context;
use payloads::{
    DurationPolicy, MAX_TOTAL_DURATION_MINUTES, responses::PlanDraftSeed,
};
use serde::Deserialize;
use web_sys::Document;

const CSRF_META: &str = "csrf-token";
const SETTINGS_META: &str = "plan-form-config";
const DRAFT_SCRIPT_ID: &str = "plan-draft";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlanFormSettings {
    /// Per-row maximum in minutes. Selects a [`DurationPolicy`].
    pub max_duration: i64,
    pub max_total_duration: i64,
    pub autosave: bool,
    pub reorder: bool,
    pub autosave_delay_ms: u32,
}

impl Default for PlanFormSettings {
    fn default() -> Self {
        Self {
            max_duration: DurationPolicy::STANDARD.max,
            max_total_duration: MAX_TOTAL_DURATION_MINUTES,
            autosave: true,
            reorder: true,
            autosave_delay_ms: 2000,
        }
    }
}

impl PlanFormSettings {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("parsing plan form settings")
    }

    pub fn duration_policy(&self) -> DurationPolicy {
        DurationPolicy::for_max(self.max_duration).unwrap_or_else(|| {
            tracing::warn!(
                max_duration = self.max_duration,
                "Unsupported max duration, using the standard policy"
            );
            DurationPolicy::STANDARD
        })
    }
}

pub fn parse_seed(raw: &str) -> anyhow::Result<PlanDraftSeed> {
    if raw.trim().is_empty() {
        return Ok(PlanDraftSeed::default());
    }
    serde_json::from_str(raw).context("parsing seeded plan draft")
}

/// Everything the form needs from the surrounding page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageContext {
    pub csrf_token: Option<String>,
    pub settings: PlanFormSettings,
    pub seed: PlanDraftSeed,
}

impl PageContext {
    pub fn from_document() -> Self {
        let Some(document) = web_sys::window().and_then(|w| w.document())
        else {
            tracing::warn!("No document available, using default settings");
            return Self::default();
        };

        let settings = match meta_content(&document, SETTINGS_META) {
            Some(raw) => PlanFormSettings::from_json(&raw).unwrap_or_else(|e| {
                tracing::warn!("{e:#}");
                PlanFormSettings::default()
            }),
            None => PlanFormSettings::default(),
        };

        let seed = document
            .get_element_by_id(DRAFT_SCRIPT_ID)
            .and_then(|script| script.text_content())
            .map(|raw| {
                parse_seed(&raw).unwrap_or_else(|e| {
                    tracing::warn!("{e:#}");
                    PlanDraftSeed::default()
                })
            })
            .unwrap_or_default();

        Self {
            csrf_token: csrf_token_from(&document),
            settings,
            seed,
        }
    }
}

/// The CSRF token the server put in the page head, if any.
pub fn csrf_token() -> Option<String> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|document| csrf_token_from(&document))
}

fn csrf_token_from(document: &Document) -> Option<String> {
    meta_content(document, CSRF_META).filter(|token| !token.is_empty())
}

fn meta_content(document: &Document, name: &str) -> Option<String> {
    document
        .query_selector(&format!("meta[name=\"{name}\"]"))
        .ok()
        .flatten()
        .and_then(|meta| meta.get_attribute("content"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = PlanFormSettings::from_json("{}").unwrap();
        assert_eq!(settings, PlanFormSettings::default());
        assert_eq!(settings.duration_policy(), DurationPolicy::STANDARD);
        assert!(settings.autosave);
        assert!(settings.reorder);
    }

    #[test]
    fn test_settings_extended_policy() {
        let settings = PlanFormSettings::from_json(
            r#"{"max_duration": 1440, "autosave": false, "reorder": false}"#,
        )
        .unwrap();
        assert_eq!(settings.duration_policy(), DurationPolicy::EXTENDED);
        assert!(!settings.autosave);
        assert!(!settings.reorder);
        assert_eq!(settings.max_total_duration, 480);
    }

    #[test]
    fn test_unknown_max_falls_back() {
        let settings =
            PlanFormSettings::from_json(r#"{"max_duration": 600}"#).unwrap();
        assert_eq!(settings.duration_policy(), DurationPolicy::STANDARD);
    }

    #[test]
    fn test_malformed_settings() {
        let err = PlanFormSettings::from_json("{max_duration}").unwrap_err();
        assert!(format!("{err:#}").starts_with("parsing plan form settings"));
    }

    #[test]
    fn test_seed_parsing() {
        assert_eq!(parse_seed("  ").unwrap(), PlanDraftSeed::default());
        let seed = parse_seed(
            r#"{"plan_date": "2026-11-02", "sites": [{"planned_actions": "Audit", "duration": 60}]}"#,
        )
        .unwrap();
        assert_eq!(seed.sites.len(), 1);
        assert_eq!(seed.sites[0].duration, Some(60));
        assert!(parse_seed("[]").is_err());
    }
}
