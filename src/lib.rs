//! `hydra-gate` library crate.
//!
//! Models the infidelity of a trapped-ion two-qubit gate as a function of the
//! COM trap frequency, finds the optimal operating frequency, and manages up to
//! four independently configured traces.
//!
//! The binary (`hydra`) is a thin wrapper around this library so that the
//! model, optimizer and trace logic are testable without a terminal.

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod optimize;
pub mod plot;
pub mod report;
pub mod traces;
pub mod tui;
