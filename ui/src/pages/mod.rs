pub mod not_found;
pub mod plan_editor;
pub mod plan_review;

pub use not_found::NotFoundPage;
pub use plan_editor::PlanEditorPage;
pub use plan_review::PlanReviewPage;
