//! Structured logging for repository and schema operations
//!
//! `init(profile)` installs the process-wide subscriber once. The
//! `log_op_start!`, `log_op_end!` and `log_op_error!` macros emit the
//! start/end/end_error events every store operation produces, and
//! `test_capture` collects those events for assertions.
//!
//! ```rust
//! use scoreboard_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, init_with_filter, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
