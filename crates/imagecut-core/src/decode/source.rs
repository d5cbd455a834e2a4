//! Decoding of user-supplied image files with EXIF orientation handling.
//!
//! Browsers render `<img>` elements with their EXIF orientation applied, so
//! cuts are drawn against the oriented image. Decoding here applies the same
//! orientation so exported pixels line up with what the user saw.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Whether a MIME type names an image the editor accepts.
///
/// Mirrors the `image/*` filter of the file picker: anything starting with
/// `image/` is let through, and undecodable files fail later per image.
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The format is guessed from the content, not from the file name.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized and
/// `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = get_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let oriented = apply_orientation(img, orientation);
    Ok(DecodedImage::from_rgba_image(oriented.into_rgba8()))
}

/// Read the oriented natural size of an image without decoding its pixels.
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32), DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(get_orientation(bytes).oriented_dimensions(width, height))
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    /// Encode an RGBA test image in the given container format.
    pub fn encoded(img: &RgbaImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        match format {
            ImageFormat::Jpeg => image::DynamicImage::ImageRgba8(img.clone())
                .into_rgb8()
                .write_to(&mut buffer, format)
                .unwrap(),
            _ => img.write_to(&mut buffer, format).unwrap(),
        }
        buffer.into_inner()
    }

    /// PNG whose pixel at (x, y) is `[x, y, 7, 255]` (values wrap at 256).
    pub fn coordinate_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 7, 255]));
        encoded(&img, ImageFormat::Png)
    }
}
