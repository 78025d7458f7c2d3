//! Infrastructure layer

pub mod email;
