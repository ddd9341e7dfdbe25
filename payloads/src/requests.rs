use serde::{Deserialize, Serialize};

/// Number of characters required before a site search is issued.
pub const SEARCH_TERM_MIN_LEN: usize = 2;

/// Query string of `GET /api/sites/search`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiteSearchQuery {
    pub term: String,
    pub page: u32,
}

impl SiteSearchQuery {
    pub fn first_page(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            page: 1,
        }
    }

    pub fn next_page(&self) -> Self {
        Self {
            term: self.term.clone(),
            page: self.page + 1,
        }
    }
}

/// Whether a search term is long enough to be sent.
pub fn is_searchable(term: &str) -> bool {
    term.chars().count() >= SEARCH_TERM_MIN_LEN
}

/// A reviewer's decision on a submitted plan.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PlanAction {
    Approve,
    Reject,
}

impl PlanAction {
    /// Final path segment of the action endpoint.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Approve => "Confirm Action",
            Self::Reject => "Reject Plan",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Approve => "Are you sure you want to approve this plan?",
            Self::Reject => "Please provide a reason for rejection:",
        }
    }

    pub fn requires_reason(&self) -> bool {
        matches!(self, Self::Reject)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("You need to provide a reason!")]
pub struct ReasonRequired;

/// Body of `POST /plans/<id>/<action>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanActionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl PlanActionRequest {
    pub fn approve() -> Self {
        Self { reason: None }
    }

    /// A rejection must carry a reason with some visible text.
    pub fn reject(reason: &str) -> Result<Self, ReasonRequired> {
        if reason.trim().is_empty() {
            return Err(ReasonRequired);
        }
        Ok(Self {
            reason: Some(reason.to_string()),
        })
    }

    /// Build the request for `action` from whatever the dialog collected.
    pub fn for_action(
        action: PlanAction,
        reason: &str,
    ) -> Result<Self, ReasonRequired> {
        match action {
            PlanAction::Approve => Ok(Self::approve()),
            PlanAction::Reject => Self::reject(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_requires_reason() {
        assert_eq!(PlanActionRequest::reject(""), Err(ReasonRequired));
        assert_eq!(PlanActionRequest::reject("  \n"), Err(ReasonRequired));
        assert_eq!(
            PlanActionRequest::reject("Site is flooded").unwrap().reason,
            Some("Site is flooded".to_string())
        );
    }

    #[test]
    fn test_approve_ignores_reason() {
        assert_eq!(
            PlanActionRequest::for_action(PlanAction::Approve, ""),
            Ok(PlanActionRequest::approve())
        );
    }

    #[test]
    fn test_searchable_terms() {
        assert!(!is_searchable(""));
        assert!(!is_searchable("a"));
        assert!(is_searchable("ab"));
        assert!(!is_searchable("é"));
    }
}
