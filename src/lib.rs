//! # readaloud
//!
//! Submit a URL, keep the page's visible text, and read it back in the
//! browser, either on screen or through speech synthesis.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌──────────┐
//! │ /submit  │──▶│  Fetch   │──▶│  Extract  │──▶│  SQLite  │
//! │   -url   │   │ reqwest  │   │  scraper  │   │   url    │
//! └──────────┘   └──────────┘   └───────────┘   └────┬─────┘
//!       │ 302                                        │
//!       ▼                                            ▼
//! ┌──────────────┐                            ┌────────────┐
//! │ /text-reader │◀───────────────────────────│  Renderer  │
//! └──────────────┘                            └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! readaloud init                                  # create database
//! PORT=3000 readaloud serve                       # start HTTP server
//! readaloud extract https://example.com           # preview without storing
//! readaloud get https://example.com               # show stored text
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and `PORT` override |
//! | [`models`] | Core data types |
//! | [`fetch`] | Outbound HTTP(S) fetching |
//! | [`extract`] | HTML to visible text |
//! | [`store`] | Record storage trait, SQLite and in-memory backends |
//! | [`migrate`] | Schema creation |
//! | [`render`] | Page templates |
//! | [`pipeline`] | Submit pipeline |
//! | [`server`] | HTTP routes |

pub mod config;
pub mod extract;
pub mod extract_cmd;
pub mod fetch;
pub mod get;
pub mod migrate;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod server;
pub mod store;
