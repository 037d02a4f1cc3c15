//! Pure scoring functions consumed by the relation attacher.
//!
//! Both functions are deterministic: identical rows always produce identical
//! output, which keeps relation attachment side-effect free.

use crate::types::Row;
use crate::value::{to_number, to_text};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Lowest technology readiness level.
pub const MIN_TRL: u8 = 1;
/// Highest technology readiness level.
pub const MAX_TRL: u8 = 9;

/// Forecast of a project's technology readiness.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrlForecast {
    /// TRL recorded on the project, clamped to 1..=9.
    pub current_level: u8,
    /// TRL expected at the end of the next funding cycle.
    pub predicted_level: u8,
    /// Estimated months until the next level; 0 at TRL 9.
    pub months_to_next_level: u32,
    /// Confidence in the forecast, 0.0..=0.95.
    pub confidence: f64,
}

/// How well a research project fits an industry challenge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynergyScore {
    /// Fit score, 0..=100.
    pub score: u8,
    /// Lowercased terms present on both sides, sorted.
    pub matched_keywords: Vec<String>,
}

/// Forecasts TRL progress from `trl_level`, `funding_amount` and `team_size`.
#[must_use]
pub fn forecast_trl(project: &Row) -> TrlForecast {
    let raw = to_number(project.get("trl_level")).round();
    let current_level = raw.clamp(f64::from(MIN_TRL), f64::from(MAX_TRL)) as u8;

    let funding = to_number(project.get("funding_amount")).max(0.0);
    let team = to_number(project.get("team_size")).max(0.0);
    let momentum = (funding / 250_000.0).min(2.0) + (team / 5.0).min(1.0);

    let gain = if momentum >= 2.0 {
        2
    } else if momentum >= 0.75 {
        1
    } else {
        0
    };
    let predicted_level = (current_level + gain).min(MAX_TRL);

    let months_to_next_level = if current_level >= MAX_TRL {
        0
    } else {
        let base = 6.0 + 2.0 * f64::from(current_level);
        (base / (1.0 + momentum)).ceil() as u32
    };

    let confidence = ((0.45 + 0.15 * momentum).min(0.95) * 100.0).round() / 100.0;

    TrlForecast {
        current_level,
        predicted_level,
        months_to_next_level,
        confidence,
    }
}

/// Scores a project against a challenge by keyword overlap.
///
/// Project terms come from `keywords` and `research_area`; challenge terms
/// from `required_expertise` and `industry`. A project at or above the
/// challenge's `min_trl` earns a bonus of 10.
#[must_use]
pub fn synergy_score(project: &Row, challenge: &Row) -> SynergyScore {
    let project_terms = terms(project, &["keywords", "research_area"]);
    let challenge_terms = terms(challenge, &["required_expertise", "industry"]);

    let matched_keywords: Vec<String> = project_terms
        .intersection(&challenge_terms)
        .cloned()
        .collect();

    let mut score = if challenge_terms.is_empty() {
        0.0
    } else {
        100.0 * matched_keywords.len() as f64 / challenge_terms.len() as f64
    };

    if challenge.get("min_trl").is_some()
        && to_number(project.get("trl_level")) >= to_number(challenge.get("min_trl"))
    {
        score += 10.0;
    }

    SynergyScore {
        score: score.round().min(100.0) as u8,
        matched_keywords,
    }
}

/// Collects lowercased terms from string, comma-separated or array fields.
fn terms(row: &Row, fields: &[&str]) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for field in fields {
        match row.get(*field) {
            Some(Value::Array(items)) => {
                for item in items {
                    insert_terms(&mut out, &to_text(Some(item)));
                }
            }
            other => insert_terms(&mut out, &to_text(other)),
        }
    }
    out
}

fn insert_terms(out: &mut BTreeSet<String>, text: &str) {
    out.extend(
        text.split(',')
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn forecast_clamps_level() {
        assert_eq!(forecast_trl(&row(json!({"trl_level": 14}))).current_level, 9);
        assert_eq!(forecast_trl(&row(json!({}))).current_level, 1);
    }

    #[test]
    fn forecast_at_max_has_no_next_level() {
        let forecast = forecast_trl(&row(json!({"trl_level": 9, "funding_amount": 1_000_000})));
        assert_eq!(forecast.predicted_level, 9);
        assert_eq!(forecast.months_to_next_level, 0);
    }

    #[test]
    fn forecast_funding_speeds_progress() {
        let lean = forecast_trl(&row(json!({"trl_level": 3})));
        let funded = forecast_trl(&row(json!({
            "trl_level": 3, "funding_amount": 600_000, "team_size": 6
        })));
        assert_eq!(lean.predicted_level, 3);
        assert_eq!(funded.predicted_level, 5);
        assert!(funded.months_to_next_level < lean.months_to_next_level);
        assert!(funded.confidence > lean.confidence);
        assert!(funded.confidence <= 0.95);
    }

    #[test]
    fn forecast_is_deterministic() {
        let project = row(json!({"trl_level": "4", "funding_amount": 120000, "team_size": 3}));
        assert_eq!(forecast_trl(&project), forecast_trl(&project));
    }

    #[test]
    fn synergy_counts_overlap() {
        let project = row(json!({
            "keywords": ["Battery", "solid-state"],
            "research_area": "Energy Storage",
        }));
        let challenge = row(json!({
            "required_expertise": "battery, energy storage, thermal",
            "industry": "Automotive",
        }));
        let synergy = synergy_score(&project, &challenge);
        assert_eq!(synergy.matched_keywords, vec!["battery", "energy storage"]);
        assert_eq!(synergy.score, 50);
    }

    #[test]
    fn synergy_trl_bonus_caps_at_100() {
        let project = row(json!({"keywords": "ai", "trl_level": 6}));
        let challenge = row(json!({"required_expertise": "AI", "min_trl": 5}));
        assert_eq!(synergy_score(&project, &challenge).score, 100);
    }

    #[test]
    fn synergy_empty_challenge() {
        let synergy = synergy_score(&row(json!({"keywords": "ai"})), &row(json!({})));
        assert_eq!(synergy.score, 0);
        assert!(synergy.matched_keywords.is_empty());
    }
}
