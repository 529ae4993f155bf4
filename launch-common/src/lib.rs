pub mod types;

pub use types::{LaunchLinks, LaunchRecord, LaunchStatus, PAGE_SIZE};
