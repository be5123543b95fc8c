//! Language catalog handler.
//!
//! The UI layer groups and labels lessons from this table rather than keeping
//! its own copy of the ranges.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::locator::LanguageRange;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierInfo {
    pub label: String,
    pub first_local: u32,
    pub last_local: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
    pub code: String,
    pub start_id: u32,
    pub end_id: u32,
    pub lesson_count: u32,
    pub tiers: Vec<TierInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub max_id: u32,
    pub languages: Vec<LanguageInfo>,
}

impl From<&LanguageRange> for LanguageInfo {
    fn from(range: &LanguageRange) -> Self {
        let mut first_local = 1;
        let tiers = range
            .tiers
            .iter()
            .map(|rule| {
                let last_local = rule.max_local.unwrap_or(range.width());
                let info = TierInfo {
                    label: rule.label.clone(),
                    first_local,
                    last_local,
                };
                first_local = last_local + 1;
                info
            })
            .collect();

        Self {
            code: range.code.clone(),
            start_id: range.start_id,
            end_id: range.end_id,
            lesson_count: range.width(),
            tiers,
        }
    }
}

pub async fn list_languages(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        max_id: state.catalog.max_id(),
        languages: state.catalog.languages().iter().map(LanguageInfo::from).collect(),
    })
}
