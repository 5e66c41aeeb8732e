//! Grid backdrop artwork processing
//!
//! The backdrop ships with pure black authoring artifacts. Every opaque-ish
//! black pixel is recolored to the backdrop fill; alpha is left untouched.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::types::BACKDROP_COLOR;

#[derive(Debug, thiserror::Error)]
pub enum ArtworkError {
    #[error("failed to load backdrop artwork {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("backdrop artwork {path} has no pixels")]
    Empty { path: PathBuf },
}

/// Recolor pixels with RGB (0, 0, 0) and non-zero alpha to `fill` (0xRRGGBB).
///
/// Returns the number of pixels changed.
pub fn recolor_backdrop(image: &mut RgbaImage, fill: u32) -> usize {
    let r = ((fill >> 16) & 0xFF) as u8;
    let g = ((fill >> 8) & 0xFF) as u8;
    let b = (fill & 0xFF) as u8;

    let mut changed = 0;
    for px in image.pixels_mut() {
        let [pr, pg, pb, pa] = px.0;
        if pr == 0 && pg == 0 && pb == 0 && pa != 0 {
            px.0 = [r, g, b, pa];
            changed += 1;
        }
    }
    changed
}

/// Decode the backdrop at `path` and apply [`recolor_backdrop`] with the default fill.
pub fn load_backdrop(path: impl AsRef<Path>) -> Result<RgbaImage, ArtworkError> {
    let path = path.as_ref();
    let mut image = image::open(path)
        .map_err(|source| ArtworkError::Load {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    if image.width() == 0 || image.height() == 0 {
        return Err(ArtworkError::Empty {
            path: path.to_path_buf(),
        });
    }

    let changed = recolor_backdrop(&mut image, BACKDROP_COLOR);
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        recolored = changed,
        "backdrop artwork processed"
    );
    Ok(image)
}

/// Nearest pixel at normalized coordinates `(u, v)` in `[0, 1)`.
pub fn sample(image: &RgbaImage, u: f32, v: f32) -> Option<[u8; 4]> {
    if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
        return None;
    }
    let x = (u * image.width() as f32) as u32;
    let y = (v * image.height() as f32) as u32;
    image.get_pixel_checked(x, y).map(|p| p.0)
}
