// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # quizdash
//!
//! A terminal dashboard for an external quiz-automation backend.
//!
//! The dashboard shows the backend's service status, polls its run history,
//! lets an operator submit a quiz job (email, secret, URL), and keeps a
//! rolling log of recent actions. All job execution and history persistence
//! live in the backend; this crate is the presentation layer over three
//! HTTP calls.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (derived)│    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │ ▲ ApiEvent                                          │
//! │       ▼ │                                                   │
//! │  ┌─────────┐                                                │
//! │  │ backend │◀── Dispatcher | Poller ──▶ HttpBackend ──▶ HTTP │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: The state container: status, history, log buffer, form, focus
//! - **[`backend`]**: The [`QuizBackend`] trait, its HTTP implementation, the
//!   dispatcher that runs calls off the UI thread, and the cancellable poll loop
//! - **[`data`]**: Log buffer, derived stats, history with stale-response
//!   protection, form state and validation
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered settings (defaults, file, `QUIZDASH_*` environment)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a local backend
//! quizdash
//!
//! # Watch a remote backend, polling every 10 seconds
//! quizdash --backend-url https://quiz.example.com --poll-interval 10s
//!
//! # Dump history and stats to JSON and exit
//! quizdash --export history.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::sync::Arc;
//! use quizdash::{App, HttpBackend, Settings};
//!
//! # tokio_test::block_on(async {
//! let settings = Settings::default();
//! let backend = Arc::new(HttpBackend::new(&settings.backend_url).unwrap());
//! let mut app = App::new(backend, tokio::runtime::Handle::current(), &settings);
//!
//! // Fetch status, start polling history
//! app.start();
//! # });
//! ```

pub mod app;
pub mod backend;
pub mod config;
pub mod data;
pub mod events;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Pane};
pub use backend::{
    ApiError, ApiEvent, Dispatcher, HistoryEntry, HttpBackend, JobResult, PollHandle, Poller,
    QuizBackend, QuizRequest, RunStatus, ServiceStatus,
};
pub use config::Settings;
pub use data::{DerivedStats, History, LogBuffer, QuizForm};
