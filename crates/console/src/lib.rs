//! `stockkeep-console`: interactive front end for the inventory store.
//!
//! Owns everything the domain crates stay out of: reading configuration,
//! prompting and re-prompting, the menu loop, and rendering reports.

pub mod config;
pub mod error;
pub mod menu;
pub mod prompt;
pub mod report;

pub use config::{ConfigError, ConsoleConfig};
pub use error::ConsoleError;
pub use menu::{Console, MenuChoice, UpdateField};
pub use prompt::Prompter;
pub use report::{MoneyFormat, ParseReportFormatError, ReportFormat};
