//! Shared UI components for the site.

pub mod layout;
pub mod modal;
pub mod nav;
pub mod theme;

pub use layout::Layout;
pub use nav::Nav;
