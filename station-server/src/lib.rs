//! Station list server.
//!
//! Serves a list of stations from an unreliable upstream source, with an
//! in-memory cache, request coalescing, and refresh that falls back to the
//! last good list.

pub mod config;
pub mod domain;
pub mod repository;
pub mod stations;
pub mod web;
