//! Email domain: request and message model, assembly, and dispatch

pub mod addresses;
pub mod builder;
pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod message;
pub mod outcome;
pub mod priority;
pub mod request;
pub mod template;
pub mod transport;
