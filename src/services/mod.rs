pub mod catalog;
pub mod lists;
pub mod newsletter;
pub mod profiles;
pub mod providers;
pub mod theme;
pub mod view;

pub use catalog::{CatalogService, LandingPage, MovieDetailPage, Section};
pub use lists::{AddOutcome, ListKind, ListManager};
pub use profiles::ProfileManager;
pub use view::ViewHandle;
