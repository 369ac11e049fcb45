pub mod batch;
pub mod cache;
pub mod codec;
pub mod command;
pub mod decimate;
pub mod error;
pub mod job;
pub mod quote;
pub mod remux;
pub mod runner;
