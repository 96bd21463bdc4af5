//! Client library for connecting to tetoegend.
//!
//! Provides [`ServiceClient`], which calls the HTTP API, and the
//! presentation state machine it feeds ([`crate::view::AnalyzeView`]).

mod service_client;

pub use service_client::ServiceClient;
