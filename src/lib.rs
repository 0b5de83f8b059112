//! Semester Offerings - Course offering scheduling core
//!
//! This crate implements semester registration periods and the course
//! sections offered within them: faculty timetable conflict detection,
//! catalog reference validation, the registration lifecycle, and atomic
//! cascade deletion.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
