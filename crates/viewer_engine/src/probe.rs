use image::GenericImageView;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decodes just enough of the raster to learn its pixel dimensions. The
/// coordinate mapper cannot run before these are known.
pub fn probe_image_dimensions(bytes: &[u8]) -> Result<(u32, u32), ProbeError> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(decoded.dimensions())
}
