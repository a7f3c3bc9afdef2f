//! Hand-gesture arcade shooter: the simulation core.
//!
//! The host supplies hand landmarks, a drawing surface and a clock; the core
//! turns them into score, level, lives and a rendered frame.

pub mod audio;
pub mod canvas;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod perception;
pub mod session;
pub mod state;
