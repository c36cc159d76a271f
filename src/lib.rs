//! A continuous grid world where a battery powered agent chases a target.
//!
//! [`env::GridWorldEnv`] holds the simulation, [`render`] turns an episode
//! state into pixels or text, and [`host::GridWorldHost`] ties both together
//! behind the usual `reset`/`step`/`render`/`close` lifecycle.

pub mod env;
pub mod host;
pub mod policy;
pub mod render;
pub mod utils;

pub use env::{Action, Env, GridWorldConfig, GridWorldEnv};
pub use host::GridWorldHost;
