#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Process every image of a folder with the aura filter.
pub mod batch;

pub use aura_imgproc::aura::AuraParams;
