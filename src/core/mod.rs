//! # Fetch Controller
//!
//! Owns the selection (category + page) and the result of the latest
//! request. Input of any kind arrives as an [`action::Action`]; the reducer
//! answers with an [`action::Effect`] describing I/O for the adapter to run.
//! Nothing here touches the network or the terminal.
//!
//! ```text
//!   key / click ──► Action ──► update(&mut App) ──► Effect::Fetch
//!                     ▲                                   │
//!                     │                             tokio task
//!                     └──── FetchSucceeded/Failed ◄───────┘
//!                           (tagged with request token)
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `App`, `Selection`, `ResultState`
//! - [`action`]: `Action`, `Effect`, and `update()`
//! - [`config`]: config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod state;
