use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::listing::Listing;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open file: {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("file is empty: {}", path.display())]
    Empty { path: PathBuf },
}

/// A raw code memory image.
#[derive(Debug)]
pub struct Image {
    origin: u32,
    bytes: Vec<u8>,
}

impl Image {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { origin: 0, bytes }
    }

    /// Read a whole file as an image based at address zero.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        if bytes.is_empty() {
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            });
        }
        debug!(path = %path.display(), len = bytes.len(), "loaded image");
        Ok(Self::new(bytes))
    }

    /// Place the first byte of the image at `origin` in listings.
    pub fn with_origin(mut self, origin: u32) -> Self {
        self.origin = origin;
        self
    }

    pub fn origin(&self) -> u32 {
        self.origin
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Linear disassembly of the whole image.
    pub fn lines(&self) -> Listing<'_> {
        Listing::new(&self.bytes, self.origin)
    }
}
