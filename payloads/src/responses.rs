use crate::SiteId;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// A site as returned by the site search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSummary {
    pub id: SiteId,
    /// Human-facing site code, e.g. `ABC1234`.
    #[serde(rename = "site_id")]
    pub code: String,
    pub name: String,
    /// Some deployments still report the district as `kabupaten`.
    #[serde(default, alias = "kabupaten")]
    pub location: Option<String>,
}

impl SiteSummary {
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub more: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSearchResults {
    pub sites: Vec<SiteSummary>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Response to a background draft save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSaved {
    pub success: bool,
}

/// Any endpoint that answers with a human-readable message, on success and
/// on failure alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessMessage {
    pub message: String,
}

/// A draft rendered into the page by the server, used to seed the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDraftSeed {
    #[serde(default)]
    pub plan_date: Option<Date>,
    #[serde(default)]
    pub sites: Vec<SeededSiteRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededSiteRow {
    #[serde(default)]
    pub site: Option<SiteSummary>,
    #[serde(default)]
    pub planned_actions: String,
    #[serde(default)]
    pub duration: Option<i64>,
}
