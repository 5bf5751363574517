//! Test helpers shared across crates.
//!
//! [`tree`] builds throwaway locale directories, [`mo`] encodes compiled
//! catalogs byte by byte and [`jail`] runs configuration tests inside an
//! isolated `figment::Jail`.

pub mod jail;
pub mod mo;
pub mod tree;
