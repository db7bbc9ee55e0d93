//! Client-side state derived from backend responses and operator input.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing of interval strings (e.g., "30s", "500ms") and elapsed-time formatting
//! - [`form`]: Submission form fields, validation and last outcome ([`QuizForm`])
//! - [`history`]: Committed run history with stale-response protection ([`History`])
//! - [`log`]: Capped newest-first activity log ([`LogBuffer`])
//! - [`stats`]: Aggregates over the history ([`DerivedStats`])
//!
//! ## Data Flow
//!
//! ```text
//! ApiEvent::History { token, entries }
//!        │
//!        ▼
//! History::commit()  (dropped if token is stale)
//!        │
//!        └──▶ DerivedStats::from_entries()  (on every render)
//! ```

pub mod duration;
pub mod form;
pub mod history;
pub mod log;
pub mod stats;

pub use form::{FormField, QuizForm};
pub use history::History;
pub use log::{LogBuffer, MAX_LOG_LINES};
pub use stats::DerivedStats;
