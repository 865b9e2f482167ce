//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod attendees;
pub mod banners;
pub mod footer;
pub mod forms;
pub mod header;
pub mod info_panel;
pub mod logs;
