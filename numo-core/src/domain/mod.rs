//! Domain models for NUMO Core

pub mod contact;
pub mod email;
pub mod order;

pub use contact::*;
pub use email::*;
pub use order::*;
