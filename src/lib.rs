//! BioSpace Explorer: fetch NASA bioscience publication records once,
//! search and filter them locally, and show them as cards next to a bar
//! chart of counts per category.
//!
//! Two front ends drive the same [`explore::Explorer`]: the terminal
//! ([`cli`]) and an embedded single-page dashboard ([`web`]).

pub mod cli;
pub mod config;
pub mod explore;
pub mod logging;
pub mod record;
pub mod render;
pub mod source;
pub mod web;
