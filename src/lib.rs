//! Schema-driven command line for REST APIs.
//!
//! The API publishes one schema document per resource. Those documents are
//! turned into a [`routes::RouteNode`] tree once, then every invocation walks
//! the tree with the user's tokens (`me bill list --date-from 2024-01-01`) and
//! produces a [`routes::ResolvedCall`] ready for the [`transport`].

pub mod atomic;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod fs;
pub mod grammar_cache;
pub mod logging;
pub mod output;
pub mod params;
pub mod render;
pub mod routes;
pub mod schema;
pub mod transport;
pub mod utils;
