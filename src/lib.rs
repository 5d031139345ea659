// src/lib.rs

//! leapwatch: IERS Bulletin C change monitor

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
