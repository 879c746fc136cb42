//! Perceptual image hashing with a bounded worker pool.
//!
//! Uses a difference hash (dHash): the image is downsampled, adjacent pixel
//! intensities are compared, and the comparison bits are packed into a
//! 64-bit hash. Visually similar images end up with hashes at a small
//! Hamming distance, which the grouping phase exploits.
//!
//! Hashing is the expensive phase (decode + resample per file), so
//! [`PerceptualHasher::hash_all`] fans the work out over a fixed number of
//! worker threads fed from a pre-filled job channel.

use std::path::{Path, PathBuf};
use std::thread;

use image_hasher::{HashAlg, HasherConfig, ImageHash};
use thiserror::Error;

/// Errors that can occur while hashing a single image.
#[derive(Debug, Error)]
pub enum HashError {
    /// Failed to open or decode the image.
    #[error("failed to load image {0}: {1}")]
    Load(String, #[source] image::ImageError),
}

/// Path and perceptual hash of one successfully hashed image.
#[derive(Debug, Clone)]
pub struct ImageHashInfo {
    /// Absolute path to the image file.
    pub path: PathBuf,
    /// 64-bit difference hash.
    pub hash: ImageHash,
}

/// Computes difference hashes for candidate image files.
pub struct PerceptualHasher {
    hasher: image_hasher::Hasher,
}

impl PerceptualHasher {
    /// Create a hasher configured for the 64-bit difference hash.
    ///
    /// All hashes produced by one `PerceptualHasher` have the same width,
    /// so pairwise Hamming distances are always well defined.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hasher: HasherConfig::new().hash_alg(HashAlg::Gradient).to_hasher(),
        }
    }

    /// Compute the perceptual hash for the image at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Load`] if the file cannot be opened or decoded.
    pub fn compute_hash(&self, path: &Path) -> Result<ImageHash, HashError> {
        let img = image::open(path)
            .map_err(|e| HashError::Load(path.display().to_string(), e))?;
        Ok(self.hasher.hash_image(&img))
    }

    /// Hash all candidate paths using `workers` threads (at least one).
    ///
    /// A job channel sized to the candidate count is filled up front and
    /// closed; each worker pulls paths until the channel is drained. Results
    /// go into a channel with the same capacity, so sends never block, and
    /// it closes once the last worker exits - the drain loop below needs no
    /// separate completion signal. Files that fail to decode are logged at
    /// warn level and dropped; result order is unspecified.
    pub fn hash_all(&self, paths: &[PathBuf], workers: usize) -> Vec<ImageHashInfo> {
        let workers = workers.max(1);
        let (job_tx, job_rx) = crossbeam_channel::bounded::<PathBuf>(paths.len());
        let (result_tx, result_rx) = crossbeam_channel::bounded::<ImageHashInfo>(paths.len());

        // Capacity equals the job count, so these sends cannot block.
        for path in paths {
            let _ = job_tx.send(path.clone());
        }
        drop(job_tx);

        thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    for path in job_rx.iter() {
                        match self.compute_hash(&path) {
                            Ok(hash) => {
                                let _ = result_tx.send(ImageHashInfo { path, hash });
                            }
                            Err(e) => log::warn!("skipping unhashable file: {e}"),
                        }
                    }
                });
            }
            // Workers hold the remaining senders; the channel closes when
            // the last of them finishes.
            drop(result_tx);
        });

        result_rx.iter().collect()
    }
}

impl Default for PerceptualHasher {
    fn default() -> Self {
        Self::new()
    }
}
