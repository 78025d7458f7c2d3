//! Domain layer

pub mod email;
