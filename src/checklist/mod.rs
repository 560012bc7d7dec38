//! Checklist page logic
//!
//! Browser-free state objects and the async operations that drive them.

pub mod editor;
pub mod service;
pub mod validation;
pub mod versions;


pub use editor::{ChecklistEditor, KeyCommand};
pub use service::Applied;
pub use versions::{NewVersion, VersionBook, VersionView};
