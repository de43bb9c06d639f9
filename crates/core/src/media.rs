// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Media cleanup seam.

use thiserror::Error;
use tracing::{debug, warn};

/// A failed attempt to delete a hosted photo.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to delete media at {url}: {reason}")]
pub struct MediaError {
    pub url: String,
    pub reason: String,
}

/// Deletes previously uploaded photos by URL.
pub trait MediaStore: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the media host rejects or fails the deletion.
    fn delete_by_url(&self, url: &str) -> Result<(), MediaError>;
}

/// Media store used when no media host is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMediaStore;

impl MediaStore for NoopMediaStore {
    fn delete_by_url(&self, url: &str) -> Result<(), MediaError> {
        debug!(url, "No media host configured, skipping photo deletion");
        Ok(())
    }
}

/// Best-effort photo deletion. Failures are logged and discarded.
pub fn cleanup_photo(media: &dyn MediaStore, url: &str) {
    match media.delete_by_url(url) {
        Ok(()) => debug!(url, "Deleted photo"),
        Err(err) => warn!(url, error = %err, "Photo cleanup failed"),
    }
}
