//! Fulfillment webhook for intent-classification callbacks.
//!
//! `POST /dialogflow` maps the classified action (and, for `teste.action`, the
//! callback token) to a canned reply, optionally enriched with today's data
//! from a weather or picture-of-the-day provider.

pub mod app;
pub mod astronomy;
pub mod config;
pub mod dispatch;
pub mod enrichment;
pub mod error;
pub mod handlers;
pub mod intent;
pub mod models;
pub mod redact;
pub mod state;
pub mod weather;
