//! Text format for persisting a cart.
//!
//! ```json
//! {"version": 1, "items": [{"id": "psg-home-2024", "name": "...", "price": "95.00",
//!   "image": "/images/psg_home.jpg", "selectedSize": "M", "quantity": 1}]}
//! ```
//!
//! Blobs without a `version` field are the legacy browser shape and are read
//! as version 1.

use serde::{Deserialize, Serialize};

use super::{Cart, CartError, LineItem};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors reading or writing a cart snapshot.
#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    /// The blob is not valid JSON of the snapshot shape.
    #[error("malformed cart snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The blob was written by an unknown format version.
    #[error("unsupported cart snapshot version {found} (expected {SNAPSHOT_VERSION})")]
    UnsupportedVersion {
        /// Version found in the blob.
        found: u32,
    },
    /// The blob parsed but breaks a cart invariant.
    #[error("invalid cart snapshot: {0}")]
    Invalid(#[from] CartError),
}

/// Owned, deserialized form of a persisted cart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CartSnapshot {
    #[serde(default = "legacy_version")]
    pub version: u32,
    pub items: Vec<LineItem>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    items: &'a [LineItem],
}

const fn legacy_version() -> u32 {
    1
}

impl CartSnapshot {
    /// Serialize `cart` to the current snapshot format.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Malformed`] if serialization fails.
    pub fn encode(cart: &Cart) -> Result<String, SnapshotError> {
        let snapshot = SnapshotRef {
            version: SNAPSHOT_VERSION,
            items: cart.items(),
        };
        Ok(serde_json::to_string(&snapshot)?)
    }

    /// Parse a snapshot without validating cart invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Malformed`] for unparseable input and
    /// [`SnapshotError::UnsupportedVersion`] for unknown versions.
    pub fn parse(blob: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(blob)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
            });
        }
        Ok(snapshot)
    }

    /// Parse a snapshot into a cart, validating cart invariants.
    ///
    /// # Errors
    ///
    /// Any [`SnapshotError`]; callers restoring at startup fall back to an
    /// empty cart.
    pub fn decode(blob: &str) -> Result<Cart, SnapshotError> {
        Self::parse(blob)?.into_cart()
    }

    /// Convert into a cart, validating cart invariants.
    ///
    /// # Errors
    ///
    /// [`SnapshotError::Invalid`] if lines are duplicated, have quantity zero
    /// or their prices cannot be totalled.
    pub fn into_cart(self) -> Result<Cart, SnapshotError> {
        Ok(Cart::from_items(self.items)?)
    }
}
