//! Carrier Bays - transport bay accounting for carrier vehicles

pub mod bay;
pub mod carrier;
pub mod core;
pub mod unit;
