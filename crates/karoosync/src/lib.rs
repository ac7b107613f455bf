//! Sync planned rides from Intervals.icu to a Hammerhead Karoo.
//!
//! The pieces, in the order a run uses them:
//! - [`config`]: the `karoosync.cfg` settings file
//! - [`locate`]: picking the rides in a date window out of the calendar
//! - [`zwo`]: converting a ZWO document into a Hammerhead workout
//! - [`sync`]: login, then fetch, convert and upload per workout
//! - [`cli`]: argument parsing, logging and reporting for the binary

pub mod cli;
pub mod config;
pub mod error;
pub mod locate;
pub mod sync;
pub mod zwo;

pub use error::{SyncError, SyncResult};
pub use locate::{SyncWindow, locate};
pub use sync::{SyncOutcome, SyncReport, Syncer, UploadMode};
pub use zwo::convert;
