//! Outbound adapters implementing the domain ports against real
//! infrastructure.

pub mod mail;
pub mod persistence;
pub mod render;
