//! Image folder discovery and decoding for the game's tile faces.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use image::GenericImageView;
use match_core::{ImageId, PAIR_COUNT};
use rand::{seq::SliceRandom, Rng};
use thiserror::Error;
use tracing::{debug, info};

pub const REQUIRED_IMAGES: usize = PAIR_COUNT;
const QUALIFYING_EXTENSION: &str = "gif";

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("{} is not a valid folder", .0.display())]
    NotADirectory(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} must contain at least {required} gif images (found {found})", folder.display())]
    NotEnoughImages {
        folder: PathBuf,
        found: usize,
        required: usize,
    },
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub id: ImageId,
    pub name: String,
    pub path: PathBuf,
}

/// RGBA pixels ready to be uploaded as a texture.
#[derive(Clone)]
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

pub fn is_qualifying_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == QUALIFYING_EXTENSION)
        .unwrap_or(false)
}

/// Lists qualifying images in `folder`, sorted by file name.
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>, GalleryError> {
    if !folder.is_dir() {
        return Err(GalleryError::NotADirectory(folder.to_path_buf()));
    }

    let read_dir = fs::read_dir(folder).map_err(|source| GalleryError::Io {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut images = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| GalleryError::Io {
            path: folder.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && is_qualifying_image(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Checks that `folder` exists and holds enough images for a full board.
pub fn validate_folder(folder: &Path) -> Result<Vec<PathBuf>, GalleryError> {
    let images = scan_folder(folder)?;
    if images.len() < REQUIRED_IMAGES {
        return Err(GalleryError::NotEnoughImages {
            folder: folder.to_path_buf(),
            found: images.len(),
            required: REQUIRED_IMAGES,
        });
    }
    Ok(images)
}

#[derive(Debug, Clone)]
pub struct Gallery {
    images: Vec<ImageEntry>,
}

impl Gallery {
    /// Picks [`REQUIRED_IMAGES`] images from `folder` at random.
    pub fn open<R: Rng + ?Sized>(folder: &Path, rng: &mut R) -> Result<Self, GalleryError> {
        let mut candidates = validate_folder(folder)?;
        let found = candidates.len();
        candidates.shuffle(rng);
        candidates.truncate(REQUIRED_IMAGES);

        let images: Vec<ImageEntry> = candidates
            .into_iter()
            .enumerate()
            .map(|(index, path)| ImageEntry {
                id: ImageId(index),
                name: path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                path,
            })
            .collect();

        info!(
            folder = %folder.display(),
            found,
            chosen = ?images.iter().map(|entry| entry.name.as_str()).collect::<Vec<_>>(),
            "image folder loaded"
        );

        Ok(Self { images })
    }

    pub fn images(&self) -> &[ImageEntry] {
        &self.images
    }

    /// Decodes every chosen image, indexed by [`ImageId`].
    pub fn decode_all(&self, max_side: u32) -> Result<Vec<DecodedImage>, GalleryError> {
        self.images
            .iter()
            .map(|entry| decode_image_file(&entry.path, max_side))
            .collect()
    }
}

pub fn decode_image_file(path: &Path, max_side: u32) -> Result<DecodedImage, GalleryError> {
    let bytes = fs::read(path).map_err(|source| GalleryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = decode_image_bytes(&bytes, max_side).map_err(|reason| GalleryError::Decode {
        path: path.to_path_buf(),
        reason,
    })?;
    debug!(
        path = %path.display(),
        width = decoded.width,
        height = decoded.height,
        "decoded tile image"
    );
    Ok(decoded)
}

fn decode_image_bytes(bytes: &[u8], max_side: u32) -> Result<DecodedImage, String> {
    let dynamic = if is_gif(bytes) {
        decode_first_gif_frame(bytes)?
    } else {
        image::load_from_memory(bytes).map_err(|err| err.to_string())?
    };

    let (width, height) = dynamic.dimensions();
    let fitted = if width > max_side || height > max_side {
        dynamic.thumbnail(max_side, max_side)
    } else {
        dynamic
    };
    let rgba = fitted.to_rgba8();
    Ok(DecodedImage {
        width: rgba.width() as usize,
        height: rgba.height() as usize,
        rgba: rgba.into_raw(),
    })
}

fn is_gif(bytes: &[u8]) -> bool {
    bytes.len() >= 6 && (&bytes[..6] == b"GIF87a" || &bytes[..6] == b"GIF89a")
}

fn decode_first_gif_frame(bytes: &[u8]) -> Result<image::DynamicImage, String> {
    use image::AnimationDecoder;
    use std::io::Cursor;

    let decoder = image::codecs::gif::GifDecoder::new(Cursor::new(bytes))
        .map_err(|e| format!("gif decode init failed: {e}"))?;

    let first = decoder
        .into_frames()
        .next()
        .transpose()
        .map_err(|e| format!("gif frame decode failed: {e}"))?
        .ok_or_else(|| "gif has no frames".to_string())?;

    Ok(image::DynamicImage::ImageRgba8(first.into_buffer()))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
