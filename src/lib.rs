//! Sternum: width measurement analysis toolkit
//!
//! Reads tabular minimum/maximum sternum width measurements, derives the mean
//! width and width range per subject, summarises the distribution, runs two
//! normality tests, and flags rows that look like data-entry errors.

pub mod analysis;
pub mod cli;
pub mod core;
pub mod entities;
