//! Known command parameter layouts
//!
//! Only a subset of command codes have reverse-engineered layouts; everything
//! else round-trips through [`crate::OpaqueRecord`].

mod mab;

pub use mab::Mab;
