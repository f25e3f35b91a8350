//! Image cycling policy for one frame.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::image_loader::{DecodeError, DecodedImage, ImageDecoder};

/// Outcome of moving to another list entry
#[derive(Debug)]
pub enum Advance {
    /// Nothing to cycle through
    Empty,
    Shown(DecodedImage),
    /// `index` moved but the entry could not be decoded
    Failed(DecodeError),
}

pub struct ImageCycler {
    paths: Vec<PathBuf>,
    index: usize,
    locked: bool,
    random_order: bool,
    rng: StdRng,
}

impl std::fmt::Debug for ImageCycler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCycler")
            .field("paths", &self.paths)
            .field("index", &self.index)
            .field("locked", &self.locked)
            .field("random_order", &self.random_order)
            .finish()
    }
}

impl ImageCycler {
    pub fn new(paths: Vec<PathBuf>, index: usize, locked: bool, random_order: bool) -> Self {
        Self::with_rng(paths, index, locked, random_order, StdRng::from_entropy())
    }

    pub fn with_rng(
        paths: Vec<PathBuf>,
        index: usize,
        locked: bool,
        random_order: bool,
        rng: StdRng,
    ) -> Self {
        let index = if index < paths.len() { index } else { 0 };
        Self {
            paths,
            index,
            locked,
            random_order,
            rng,
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_random_order(&self) -> bool {
        self.random_order
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.paths.get(self.index).map(PathBuf::as_path)
    }

    pub fn toggle_lock(&mut self) -> bool {
        self.locked = !self.locked;
        self.locked
    }

    pub fn toggle_random_order(&mut self) -> bool {
        self.random_order = !self.random_order;
        self.random_order
    }

    /// Decode the entry at the current index without moving
    pub fn show_current(&self, decoder: &dyn ImageDecoder) -> Advance {
        match self.current_path() {
            Some(path) => load(decoder, path),
            None => Advance::Empty,
        }
    }

    /// Move to the next entry (sequential wrap or uniform random pick) and
    /// decode it. Callers check the lock for hover/click/timer triggers.
    pub fn advance(&mut self, decoder: &dyn ImageDecoder) -> Advance {
        if self.paths.is_empty() {
            return Advance::Empty;
        }

        self.index = if self.random_order {
            self.rng.gen_range(0..self.paths.len())
        } else {
            (self.index + 1) % self.paths.len()
        };
        debug!(index = self.index, random = self.random_order, "advancing");

        self.show_current(decoder)
    }

    /// Append a dropped path and jump straight to it. Ignores the lock.
    pub fn add_and_show(&mut self, path: PathBuf, decoder: &dyn ImageDecoder) -> Advance {
        self.paths.push(path);
        self.index = self.paths.len() - 1;
        self.show_current(decoder)
    }
}

fn load(decoder: &dyn ImageDecoder, path: &Path) -> Advance {
    match decoder.decode(path) {
        Ok(img) => Advance::Shown(img),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to decode image, keeping previous");
            Advance::Failed(e)
        }
    }
}
