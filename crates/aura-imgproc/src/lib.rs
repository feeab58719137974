#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// inverted greyscale with a luminance glow.
pub mod aura;

/// color transformations module.
pub mod color;

/// image filtering module.
pub mod filter;

/// color inversion module.
pub mod invert;

/// border handling for spatial filters.
pub mod padding;

/// module containing parallization utilities.
pub mod parallel;

/// utility functions for resizing images.
pub mod resize;

/// operations to threshold images.
pub mod threshold;
