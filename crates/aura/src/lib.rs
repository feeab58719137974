//! Invert an image, convert it to greyscale and add a glow around the
//! regions that end up bright.
//!
//! ```no_run
//! use aura::imgproc::aura::{apply_aura, AuraParams};
//!
//! let image = aura::io::functional::read_image_any_rgb8("input/photo.png").unwrap();
//! let out = apply_aura(&image, &AuraParams::default()).unwrap();
//! aura::io::jpeg::write_image_jpeg_rgb8("output/photo_processed.jpg", &out.image, 95).unwrap();
//! ```

#[doc(inline)]
pub use aura_image as image;

#[doc(inline)]
pub use aura_imgproc as imgproc;

#[doc(inline)]
pub use aura_io as io;
