//! Client entry point.
//!
//! [`PixelaClient`] owns the transport and the codec pool; everything else
//! (user contexts, graph handles, descriptors) is a cheap value built on top.

pub mod builder;
pub mod core;

pub use builder::PixelaClientBuilder;
pub use core::PixelaClient;
