use aura::{
    image::{Image, ImageSize},
    imgproc::aura::{apply_aura, AuraParams},
    io::{functional, jpeg, IoError},
};

#[test]
fn read_filter_write() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let input = tmp_dir.path().join("frame.jpg");
    let output = tmp_dir.path().join("frame_processed.jpg");

    // light background with a dark stripe in the middle
    let size = ImageSize {
        width: 60,
        height: 40,
    };
    let mut image = Image::<u8, 3>::from_size_val(size, 230)?;
    for row in image.as_slice_mut().chunks_exact_mut(60 * 3) {
        row[27 * 3..33 * 3].fill(10);
    }
    jpeg::write_image_jpeg_rgb8(&input, &image, 95)?;

    let decoded = functional::read_image_any_rgb8(&input)?;
    let out = apply_aura(&decoded, &AuraParams::default())?;
    jpeg::write_image_jpeg_rgb8(&output, &out.image, 95)?;

    assert!(out.bright_pixel_count >= 5 * 40);
    assert!(out.bright_pixel_count < 60 * 40);

    let written = functional::read_image_any_rgb8(&output)?;
    assert_eq!(written.size(), size);
    Ok(())
}

#[test]
fn missing_file_is_reported() {
    let res = functional::read_image_any_rgb8("nowhere/photo.png");
    assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
}
