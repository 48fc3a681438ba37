//! Core domain types and logic.

pub mod ohlcv;
pub mod validation;
pub mod candle;
pub mod indicator;
pub mod engine;
pub mod returns;
pub mod chart;
pub mod error;
