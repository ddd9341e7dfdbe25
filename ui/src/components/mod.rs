pub mod modal;
pub mod plan_action_buttons;
pub mod plan_action_dialog;
pub mod plan_form;
pub mod site_row;
pub mod site_select;
pub mod toast;

pub use modal::Modal;
pub use plan_action_buttons::PlanActionButtons;
pub use plan_action_dialog::PlanActionDialog;
pub use plan_form::PlanForm;
pub use site_row::SiteRowEditor;
pub use site_select::SiteSelect;
pub use toast::ToastContainer;
