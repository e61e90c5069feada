//! Request middleware for the HTTP adapter.

pub mod trace;

pub use trace::Trace;
