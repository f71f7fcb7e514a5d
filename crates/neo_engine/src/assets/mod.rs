//! Asset management
//!
//! Textures are fetched through a [`ResourceProvider`], decoded with the
//! `image` crate and delivered asynchronously by [`AsyncTextureLoader`].

mod loader;
mod provider;
mod texture;

pub use loader::{AsyncTextureLoader, TextureLoad};
pub use provider::{FileResourceProvider, MemoryResourceProvider, ResourceProvider};
pub use texture::{TextureData, TextureKind};

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Resource could not be read, or a worker could not be started
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No resource under the requested path
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bytes are not a decodable image
    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// The owning scene was torn down
    #[error("Load cancelled")]
    Cancelled,
}
