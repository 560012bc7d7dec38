//! UI Components
//!
//! Leptos components of the checklist admin page.

mod modal;
mod toast_host;
mod item_table;
mod item_modal;
mod version_panel;
mod version_view_modal;
mod role_banner;
mod user_menu;
mod api_base_field;

pub use modal::Modal;
pub use toast_host::ToastHost;
pub use item_table::ItemTable;
pub use item_modal::{ItemDialog, ItemModal};
pub use version_panel::VersionPanel;
pub use version_view_modal::VersionViewModal;
pub use role_banner::RoleBanner;
pub use user_menu::UserMenu;
pub use api_base_field::ApiBaseField;
