//! art-booth library crate.
//!
//! A chat-driven image transform engine: users submit a photo, pick a glyph
//! ramp, and choose a transform; the engine replies with ASCII art or a
//! processed image. The messaging platform itself is an external collaborator
//! behind the traits in [`platform`].

pub mod action;
pub mod ascii;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod platform;
pub mod raster;
pub mod session;
