// src/project/mod.rs

pub mod links;
pub mod report;
pub mod store;

pub use report::DesignReport;
pub use store::{LoadedProject, ProjectStore, SavedProject};
