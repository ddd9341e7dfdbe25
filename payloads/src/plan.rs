//! The in-memory plan draft: an ordered list of site rows plus a plan date.
//!
//! Everything the form controller decides (row bookkeeping, duration
//! clamping, submit-time validation, the autosave field list) lives here so
//! it can be exercised without a browser.

use std::collections::BTreeSet;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DEFAULT_ROW_DURATION_MINUTES, SiteId, responses};

/// Stable identity of a row for the lifetime of the page.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    derive_more::Display,
)]
pub struct RowKey(pub Uuid);

impl RowKey {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RowKey {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounds applied to a single row's duration, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationPolicy {
    pub min: i64,
    pub max: i64,
}

impl DurationPolicy {
    /// One visit fits inside a working day.
    pub const STANDARD: Self = Self { min: 15, max: 480 };
    /// A single visit may span a full day.
    pub const EXTENDED: Self = Self { min: 15, max: 1440 };

    /// Look up a known policy by its maximum. Returns None for any maximum
    /// that is not one of the two supported policies.
    pub fn for_max(max: i64) -> Option<Self> {
        [Self::STANDARD, Self::EXTENDED]
            .into_iter()
            .find(|policy| policy.max == max)
    }

    pub fn contains(&self, minutes: i64) -> bool {
        (self.min..=self.max).contains(&minutes)
    }

    pub fn clamp(&self, minutes: i64) -> DurationCheck {
        if minutes < self.min {
            DurationCheck::RaisedToMin(self.min)
        } else if minutes > self.max {
            DurationCheck::LoweredToMax(self.max)
        } else {
            DurationCheck::Within(minutes)
        }
    }
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Outcome of clamping a duration to a [`DurationPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationCheck {
    Within(i64),
    RaisedToMin(i64),
    LoweredToMax(i64),
}

impl DurationCheck {
    pub fn minutes(&self) -> i64 {
        match *self {
            Self::Within(m) | Self::RaisedToMin(m) | Self::LoweredToMax(m) => m,
        }
    }

    /// Warning to show the user when the value had to be changed.
    pub fn warning(&self) -> Option<String> {
        match *self {
            Self::Within(_) => None,
            Self::RaisedToMin(min) => {
                Some(format!("Minimum duration is {min} minutes"))
            }
            Self::LoweredToMax(max) => Some(format!(
                "Maximum duration is {max} minutes ({} hours)",
                max / 60
            )),
        }
    }
}

/// Parse the contents of a duration input.
///
/// Fractional values are truncated. Blank or non-numeric input yields None.
pub fn parse_duration_input(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.trunc() as i64)
    })
}

/// A site picked from search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedSite {
    pub id: SiteId,
    /// `"<site code> - <name>"`
    pub label: String,
    pub location: Option<String>,
}

impl From<&responses::SiteSummary> for SelectedSite {
    fn from(site: &responses::SiteSummary) -> Self {
        Self {
            id: site.id,
            label: site.label(),
            location: site.location.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRow {
    pub key: RowKey,
    pub site: Option<SelectedSite>,
    pub planned_actions: String,
    /// None while the input is blank or unparseable.
    pub duration: Option<i64>,
    /// 1-based position in the plan.
    pub visit_order: usize,
}

impl SiteRow {
    fn new(visit_order: usize) -> Self {
        Self {
            key: RowKey::new(),
            site: None,
            planned_actions: String::new(),
            duration: Some(DEFAULT_ROW_DURATION_MINUTES),
            visit_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("At least one site is required")]
    LastRow,
    #[error("No such row")]
    UnknownRow,
}

/// A field flagged by submit-time validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InvalidField {
    PlanDate,
    Site(RowKey),
    PlannedActions(RowKey),
    Duration(RowKey),
}

impl InvalidField {
    pub fn row(&self) -> Option<RowKey> {
        match *self {
            Self::PlanDate => None,
            Self::Site(key)
            | Self::PlannedActions(key)
            | Self::Duration(key) => Some(key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanValidationError {
    #[error("Please fill in all required fields")]
    MissingFields(BTreeSet<InvalidField>),
    #[error("Total duration cannot exceed {} hours", .max / 60)]
    TotalTooLong { total: i64, max: i64 },
}

impl PlanValidationError {
    pub fn invalid_fields(&self) -> Option<&BTreeSet<InvalidField>> {
        match self {
            Self::MissingFields(fields) => Some(fields),
            Self::TotalTooLong { .. } => None,
        }
    }
}

/// An in-progress plan. Always holds at least one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDraft {
    pub plan_date: Option<Date>,
    rows: Vec<SiteRow>,
}

impl Default for PlanDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanDraft {
    pub fn new() -> Self {
        Self {
            plan_date: None,
            rows: vec![SiteRow::new(1)],
        }
    }

    /// Build a draft from rows rendered by the server. Seeded durations are
    /// clamped to `policy` like any other edit.
    pub fn from_seed(
        seed: &responses::PlanDraftSeed,
        policy: &DurationPolicy,
    ) -> Self {
        let mut draft = Self {
            plan_date: seed.plan_date,
            rows: seed
                .sites
                .iter()
                .map(|seeded| SiteRow {
                    key: RowKey::new(),
                    site: seeded.site.as_ref().map(SelectedSite::from),
                    planned_actions: seeded.planned_actions.clone(),
                    duration: Some(
                        policy
                            .clamp(
                                seeded
                                    .duration
                                    .unwrap_or(DEFAULT_ROW_DURATION_MINUTES),
                            )
                            .minutes(),
                    ),
                    visit_order: 0,
                })
                .collect(),
        };
        if draft.rows.is_empty() {
            draft.rows.push(SiteRow::new(1));
        }
        draft.renumber();
        draft
    }

    pub fn rows(&self) -> &[SiteRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Never true while the one-row minimum holds.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, key: RowKey) -> Option<&SiteRow> {
        self.rows.iter().find(|row| row.key == key)
    }

    fn row_mut(&mut self, key: RowKey) -> Result<&mut SiteRow, RowError> {
        self.rows
            .iter_mut()
            .find(|row| row.key == key)
            .ok_or(RowError::UnknownRow)
    }

    fn index_of(&self, key: RowKey) -> Result<usize, RowError> {
        self.rows
            .iter()
            .position(|row| row.key == key)
            .ok_or(RowError::UnknownRow)
    }

    fn renumber(&mut self) {
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.visit_order = index + 1;
        }
    }

    /// Append a row with the default duration, returning its key.
    pub fn add_row(&mut self) -> RowKey {
        let row = SiteRow::new(self.rows.len() + 1);
        let key = row.key;
        self.rows.push(row);
        key
    }

    fn can_remove(&self) -> bool {
        self.rows.len() > 1
    }

    /// Whether [`Self::remove_row`] would succeed for `key`.
    pub fn check_remove(&self, key: RowKey) -> Result<(), RowError> {
        self.index_of(key)?;
        if !self.can_remove() {
            return Err(RowError::LastRow);
        }
        Ok(())
    }

    pub fn remove_row(&mut self, key: RowKey) -> Result<SiteRow, RowError> {
        self.check_remove(key)?;
        let index = self.index_of(key)?;
        let removed = self.rows.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Whether [`Self::move_row`] would succeed for these rows.
    pub fn check_move(
        &self,
        moving: RowKey,
        target: RowKey,
    ) -> Result<(), RowError> {
        self.index_of(moving)?;
        self.index_of(target)?;
        Ok(())
    }

    /// Move `moving` into the position currently held by `target`.
    ///
    /// Dragging downwards lands after the target, dragging upwards lands
    /// before it.
    pub fn move_row(
        &mut self,
        moving: RowKey,
        target: RowKey,
    ) -> Result<(), RowError> {
        let from = self.index_of(moving)?;
        let to = self.index_of(target)?;
        if from != to {
            let row = self.rows.remove(from);
            self.rows.insert(to, row);
            self.renumber();
        }
        Ok(())
    }

    pub fn set_site(
        &mut self,
        key: RowKey,
        site: Option<SelectedSite>,
    ) -> Result<(), RowError> {
        self.row_mut(key)?.site = site;
        Ok(())
    }

    pub fn set_planned_actions(
        &mut self,
        key: RowKey,
        planned_actions: String,
    ) -> Result<(), RowError> {
        self.row_mut(key)?.planned_actions = planned_actions;
        Ok(())
    }

    pub fn set_duration(
        &mut self,
        key: RowKey,
        duration: Option<i64>,
    ) -> Result<(), RowError> {
        self.row_mut(key)?.duration = duration;
        Ok(())
    }

    /// Sum of all row durations; blank durations count as zero.
    pub fn total_duration(&self) -> i64 {
        self.rows.iter().filter_map(|row| row.duration).sum()
    }

    /// Submit-time validation.
    ///
    /// Field problems are reported before the total, so a form with an
    /// empty row and an oversized total reports the missing fields.
    pub fn validate(
        &self,
        today: Date,
        policy: &DurationPolicy,
        max_total: i64,
    ) -> Result<(), PlanValidationError> {
        let mut invalid = BTreeSet::new();

        match self.plan_date {
            Some(date) if date >= today => {}
            _ => {
                invalid.insert(InvalidField::PlanDate);
            }
        }

        for row in &self.rows {
            if row.site.is_none() {
                invalid.insert(InvalidField::Site(row.key));
            }
            if row.planned_actions.trim().is_empty() {
                invalid.insert(InvalidField::PlannedActions(row.key));
            }
            if row.duration.is_none_or(|d| d < policy.min) {
                invalid.insert(InvalidField::Duration(row.key));
            }
        }

        if !invalid.is_empty() {
            return Err(PlanValidationError::MissingFields(invalid));
        }

        let total = self.total_duration();
        if total > max_total {
            return Err(PlanValidationError::TotalTooLong {
                total,
                max: max_total,
            });
        }

        Ok(())
    }

    /// The form fields this draft submits, in document order.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::with_capacity(1 + self.rows.len() * 3);
        fields.push((
            "plan_date",
            self.plan_date.map(|d| d.to_string()).unwrap_or_default(),
        ));
        for row in &self.rows {
            fields.push((
                "site_id[]",
                row.site
                    .as_ref()
                    .map(|site| site.id.to_string())
                    .unwrap_or_default(),
            ));
            fields.push(("planned_actions[]", row.planned_actions.clone()));
            fields.push((
                "duration[]",
                row.duration.map(|d| d.to_string()).unwrap_or_default(),
            ));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn site(id: i64) -> SelectedSite {
        SelectedSite {
            id: SiteId(id),
            label: format!("SIT{id:04} - Site {id}"),
            location: None,
        }
    }

    fn filled_row(draft: &mut PlanDraft, key: RowKey, id: i64, minutes: i64) {
        draft.set_site(key, Some(site(id))).unwrap();
        draft
            .set_planned_actions(key, "Check rectifier".to_string())
            .unwrap();
        draft.set_duration(key, Some(minutes)).unwrap();
    }

    #[test]
    fn test_clamp() {
        let p = DurationPolicy::STANDARD;
        assert_eq!(p.clamp(10), DurationCheck::RaisedToMin(15));
        assert_eq!(p.clamp(1000), DurationCheck::LoweredToMax(480));
        assert_eq!(p.clamp(15), DurationCheck::Within(15));
        assert_eq!(p.clamp(480), DurationCheck::Within(480));
        assert_eq!(DurationPolicy::EXTENDED.clamp(1000).minutes(), 1000);
        assert_eq!(
            DurationPolicy::EXTENDED.clamp(2000),
            DurationCheck::LoweredToMax(1440)
        );
    }

    #[test]
    fn test_clamp_warnings() {
        let p = DurationPolicy::STANDARD;
        assert_eq!(p.clamp(100).warning(), None);
        assert_eq!(
            p.clamp(0).warning().as_deref(),
            Some("Minimum duration is 15 minutes")
        );
        assert_eq!(
            p.clamp(481).warning().as_deref(),
            Some("Maximum duration is 480 minutes (8 hours)")
        );
        assert_eq!(
            DurationPolicy::EXTENDED.clamp(5000).warning().as_deref(),
            Some("Maximum duration is 1440 minutes (24 hours)")
        );
    }

    #[test]
    fn test_policy_lookup() {
        assert_eq!(DurationPolicy::for_max(480), Some(DurationPolicy::STANDARD));
        assert_eq!(
            DurationPolicy::for_max(1440),
            Some(DurationPolicy::EXTENDED)
        );
        assert_eq!(DurationPolicy::for_max(600), None);
    }

    #[test]
    fn test_parse_duration_input() {
        assert_eq!(parse_duration_input("45"), Some(45));
        assert_eq!(parse_duration_input(" 60 "), Some(60));
        assert_eq!(parse_duration_input("12.9"), Some(12));
        assert_eq!(parse_duration_input("-5"), Some(-5));
        assert_eq!(parse_duration_input(""), None);
        assert_eq!(parse_duration_input("abc"), None);
    }

    #[test]
    fn test_new_draft_has_one_default_row() {
        let draft = PlanDraft::new();
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.rows()[0].duration, Some(15));
        assert_eq!(draft.rows()[0].visit_order, 1);
    }

    #[test]
    fn test_remove_unknown_row() {
        let mut draft = PlanDraft::new();
        draft.add_row();
        assert_eq!(draft.remove_row(RowKey::new()), Err(RowError::UnknownRow));
        assert_eq!(draft.len(), 2);
    }

    #[test]
    fn test_checks_match_edits() {
        let mut draft = PlanDraft::new();
        let only = draft.rows()[0].key;
        let stranger = RowKey::new();
        assert_eq!(draft.check_remove(only), Err(RowError::LastRow));
        assert_eq!(draft.check_remove(stranger), Err(RowError::UnknownRow));

        let second = draft.add_row();
        assert_eq!(draft.check_remove(second), Ok(()));
        assert_eq!(draft.check_move(second, only), Ok(()));
        assert_eq!(
            draft.check_move(stranger, only),
            Err(RowError::UnknownRow)
        );

        let before = draft.clone();
        assert!(draft.check_remove(stranger).is_err());
        assert!(draft.move_row(stranger, only).is_err());
        assert_eq!(draft, before);
    }

    #[test]
    fn test_move_row_renumbers() {
        let mut draft = PlanDraft::new();
        let a = draft.rows()[0].key;
        let b = draft.add_row();
        let c = draft.add_row();

        draft.move_row(a, c).unwrap();
        let keys: Vec<_> = draft.rows().iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![b, c, a]);

        draft.move_row(a, b).unwrap();
        let keys: Vec<_> = draft.rows().iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![a, b, c]);

        let orders: Vec<_> = draft.rows().iter().map(|r| r.visit_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_date_is_invalid() {
        let mut draft = PlanDraft::new();
        let key = draft.rows()[0].key;
        filled_row(&mut draft, key, 1, 60);

        let err = draft
            .validate(date(2026, 10, 19), &DurationPolicy::STANDARD, 480)
            .unwrap_err();
        let fields = err.invalid_fields().unwrap();
        assert!(fields.contains(&InvalidField::PlanDate));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_today_is_allowed() {
        let mut draft = PlanDraft::new();
        draft.plan_date = Some(date(2026, 10, 19));
        let key = draft.rows()[0].key;
        filled_row(&mut draft, key, 1, 60);

        assert_eq!(
            draft.validate(date(2026, 10, 19), &DurationPolicy::STANDARD, 480),
            Ok(())
        );
    }

    #[test]
    fn test_row_fields_are_flagged() {
        let mut draft = PlanDraft::new();
        draft.plan_date = Some(date(2026, 10, 20));
        let key = draft.rows()[0].key;
        draft.set_planned_actions(key, "   ".to_string()).unwrap();
        draft.set_duration(key, None).unwrap();

        let err = draft
            .validate(date(2026, 10, 19), &DurationPolicy::STANDARD, 480)
            .unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all required fields");
        let fields = err.invalid_fields().unwrap();
        assert!(fields.contains(&InvalidField::Site(key)));
        assert!(fields.contains(&InvalidField::PlannedActions(key)));
        assert!(fields.contains(&InvalidField::Duration(key)));
        assert!(!fields.contains(&InvalidField::PlanDate));
    }

    #[test]
    fn test_short_duration_is_flagged() {
        let mut draft = PlanDraft::new();
        draft.plan_date = Some(date(2026, 10, 20));
        let key = draft.rows()[0].key;
        filled_row(&mut draft, key, 1, 10);

        let err = draft
            .validate(date(2026, 10, 19), &DurationPolicy::STANDARD, 480)
            .unwrap_err();
        assert_eq!(
            err.invalid_fields().unwrap().iter().collect::<Vec<_>>(),
            vec![&InvalidField::Duration(key)]
        );
    }

    #[test]
    fn test_total_too_long_message() {
        let err = PlanValidationError::TotalTooLong {
            total: 500,
            max: 480,
        };
        assert_eq!(err.to_string(), "Total duration cannot exceed 8 hours");
        assert!(err.invalid_fields().is_none());
    }

    #[test]
    fn test_form_fields_follow_row_order() {
        let mut draft = PlanDraft::new();
        draft.plan_date = Some(date(2026, 10, 21));
        let first = draft.rows()[0].key;
        let second = draft.add_row();
        filled_row(&mut draft, first, 7, 90);
        draft.set_duration(second, None).unwrap();

        let fields = draft.form_fields();
        assert_eq!(
            fields,
            vec![
                ("plan_date", "2026-10-21".to_string()),
                ("site_id[]", "7".to_string()),
                ("planned_actions[]", "Check rectifier".to_string()),
                ("duration[]", "90".to_string()),
                ("site_id[]", String::new()),
                ("planned_actions[]", String::new()),
                ("duration[]", String::new()),
            ]
        );
    }

    #[test]
    fn test_from_empty_seed() {
        let draft = PlanDraft::from_seed(
            &responses::PlanDraftSeed::default(),
            &DurationPolicy::STANDARD,
        );
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.plan_date, None);
    }
}
