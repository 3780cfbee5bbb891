//! Conversational movie recommendations
//!
//! Users either describe a story, which is ranked against the catalog by blending
//! embedding similarity with keyword overlap, or pick a genre and a minimum rating.
//! A small per-user state machine decides which question to ask next.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
