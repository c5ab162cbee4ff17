pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{console::ConsoleReporter, http::ApiClient, storage::FileCartRepository};
pub use config::AppConfig;
pub use core::{
    flow::{BookingFlow, FlowOutcome},
    reporter::ResultReporter,
    resolver::{CartSourceResolver, Resolution},
    submitter::{BookingDefaults, BookingSubmitter},
};
pub use utils::error::{BookingError, Result};
