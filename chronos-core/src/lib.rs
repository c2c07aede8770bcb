//! # chronos-core
//!
//! Core library for chronos - a classroom observation tracker.
//!
//! This library provides:
//! - Domain types for teaching modes, actions, engagement and log entries
//! - The [`SessionTracker`] that owns all session state and its timers
//! - Plain-text report generation and export collaborators
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use chronos_core::{Config, SessionTracker, TeachingMode, TrackerSettings};
//!
//! let config = Config::load().expect("failed to load config");
//! let mut tracker = SessionTracker::new("數學", TrackerSettings::from(&config));
//!
//! tracker.start_session("數學").expect("no session running yet");
//! tracker.toggle_mode(TeachingMode::Lecture);
//! tracker.pump();
//! println!("{}", tracker.generate_report());
//! ```

// Re-export commonly used items at the crate root
pub use activity_log::{ActivityLog, LOG_CAPACITY};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use tracker::{Change, PumpOutcome, Session, SessionTracker, TrackerSettings};
pub use types::*;

// Public modules
pub mod activity_log;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod logging;
pub mod report;
pub mod timer;
pub mod tracker;
pub mod types;
