pub mod api_client;
pub mod plan;
pub mod requests;
pub mod responses;
pub mod search;

pub use api_client::{APIClient, ClientError};
pub use plan::{
    DurationCheck, DurationPolicy, InvalidField, PlanDraft, PlanValidationError,
    RowError, RowKey, SelectedSite, SiteRow,
};
pub use requests::{PlanAction, PlanActionRequest, SiteSearchQuery};

use serde::{Deserialize, Serialize};

/// Upper bound on the summed duration of every row in a plan (8 hours).
pub const MAX_TOTAL_DURATION_MINUTES: i64 = 480;

/// Duration given to a freshly added row.
pub const DEFAULT_ROW_DURATION_MINUTES: i64 = 15;

/// Database id of a site, as submitted in `site_id[]`.
///
/// Not to be confused with the human-facing site code (e.g. `ABC1234`),
/// which lives on [`responses::SiteSummary::code`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct SiteId(pub i64);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct PlanId(pub i64);
