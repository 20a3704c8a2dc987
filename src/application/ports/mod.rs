//! Application ports

pub mod outbound;
