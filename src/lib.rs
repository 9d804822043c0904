//! Domus - house progression engine for a tiered city-building simulation

pub mod city;
pub mod core;
pub mod simulation;
pub mod spatial;
