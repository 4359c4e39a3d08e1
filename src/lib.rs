// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod core;
pub mod net;
pub mod params;
pub mod payload;
pub mod runner;
pub mod scrape;
