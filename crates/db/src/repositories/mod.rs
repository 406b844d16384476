//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or an open transaction) as the first argument.

pub mod global_styles_repo;
pub mod global_styles_revision_repo;
pub mod sidebar_widgets_repo;
pub mod site_option_repo;
pub mod widget_instance_repo;

pub use global_styles_repo::GlobalStylesRepo;
pub use global_styles_revision_repo::GlobalStylesRevisionRepo;
pub use sidebar_widgets_repo::SidebarWidgetsRepo;
pub use site_option_repo::SiteOptionRepo;
pub use widget_instance_repo::WidgetInstanceRepo;
