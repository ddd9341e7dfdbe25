pub mod use_autosave;
pub mod use_site_search;
pub mod use_title;

pub use use_autosave::{AutosaveHandle, use_autosave};
pub use use_site_search::{SiteSearchHandle, use_site_search};
pub use use_title::use_title;
