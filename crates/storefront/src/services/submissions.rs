//! Product submissions from the admin form.
//!
//! Submissions are only recorded, never added to the live catalog. Image
//! uploads are reduced to their metadata before anything is stored.

use chrono::{DateTime, Utc};
use kitbag_core::{Price, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::validation::{ValidationErrors, optional_max, required};
use crate::storage::{SharedStore, StorageError};

/// Storage key for the submission list.
pub const SUBMISSIONS_KEY: &str = "product_submissions";

/// Categories offered by the form's dropdown. Anything else is a new category.
pub const STANDARD_CATEGORIES: [&str; 5] =
    ["Argentina Home", "Club", "National Team", "Retro", "Training"];

const PLAYER_NAME_MAX: usize = 50;
const PLAYER_NUMBER_MAX: i64 = 99;
const NOTES_MAX: usize = 200;

/// Metadata of one uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
}

/// Raw admin form input.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSubmissionForm {
    pub product_name: String,
    pub team_name: String,
    pub team_description: String,
    pub price: Option<Price>,
    pub sizes: Vec<String>,
    pub player_name: Option<String>,
    pub player_number: Option<i64>,
    pub images: Vec<ImageMetadata>,
    pub category: String,
    pub tag: String,
    pub additional_notes: Option<String>,
}

/// A validated submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSubmission {
    pub product_name: String,
    pub team_name: String,
    pub team_description: String,
    pub price: Price,
    #[serde(rename = "size")]
    pub sizes: Vec<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_number: Option<u8>,
    #[serde(rename = "productImageNames")]
    pub images: Vec<ImageMetadata>,
    pub category: String,
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl ProductSubmission {
    /// Whether the category is not one of [`STANDARD_CATEGORIES`].
    #[must_use]
    pub fn is_new_category(&self) -> bool {
        !STANDARD_CATEGORIES.contains(&self.category.as_str())
    }
}

impl ProductSubmissionForm {
    /// Check every field and build a submission.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] with one message per failing field.
    pub fn validate(&self) -> Result<ProductSubmission, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let product_name = required(
            &mut errors,
            "productName",
            &self.product_name,
            "Product Name is required",
        );
        let team_name = required(&mut errors, "teamName", &self.team_name, "Team Name is required");
        let team_description = required(
            &mut errors,
            "teamDescription",
            &self.team_description,
            "Team Description is required",
        );

        let price = match self.price {
            None => {
                errors.add("price", "Price must be a number");
                Price::zero()
            }
            Some(price) => {
                if !price.is_positive() {
                    errors.add("price", "Price must be a positive number");
                }
                price
            }
        };

        let mut sizes = Vec::with_capacity(self.sizes.len());
        for raw in &self.sizes {
            match raw.parse::<Size>() {
                Ok(size) => sizes.push(size),
                Err(_) => errors.add("sizes", "Invalid size selected"),
            }
        }
        sizes.sort_unstable();
        sizes.dedup();
        if self.sizes.is_empty() {
            errors.add("sizes", "At least one size is required");
        }

        let player_name = optional_max(
            &mut errors,
            "playerName",
            self.player_name.as_deref(),
            PLAYER_NAME_MAX,
            "Player Name cannot exceed 50 characters",
        );

        let player_number = match self.player_number {
            None => None,
            Some(n) if n < 0 => {
                errors.add("playerNumber", "Player Number cannot be negative");
                None
            }
            Some(n) if n > PLAYER_NUMBER_MAX => {
                errors.add("playerNumber", "Player Number cannot exceed 99");
                None
            }
            Some(n) => u8::try_from(n).ok(),
        };

        if self.images.is_empty() {
            errors.add("images", "At least one image is required");
        }

        let category = required(&mut errors, "category", &self.category, "Category is required");
        let tag = required(&mut errors, "tag", &self.tag, "Tag is required");
        let additional_notes = optional_max(
            &mut errors,
            "additionalNotes",
            self.additional_notes.as_deref(),
            NOTES_MAX,
            "Additional Notes cannot exceed 200 characters",
        );

        errors.into_result(ProductSubmission {
            product_name,
            team_name,
            team_description,
            price,
            sizes,
            player_name,
            player_number,
            images: self.images.clone(),
            category,
            tag,
            additional_notes,
        })
    }
}

/// A submission as recorded in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSubmission {
    #[serde(flatten)]
    pub submission: ProductSubmission,
    pub submission_date: DateTime<Utc>,
}

/// Errors recording submissions.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to encode submissions: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The list of recorded submissions.
pub struct SubmissionStore {
    storage: SharedStore,
    key: String,
}

impl std::fmt::Debug for SubmissionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl SubmissionStore {
    /// Submissions stored under [`SUBMISSIONS_KEY`].
    #[must_use]
    pub fn new(storage: SharedStore) -> Self {
        Self::with_key(storage, SUBMISSIONS_KEY)
    }

    #[must_use]
    pub fn with_key(storage: SharedStore, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Every recorded submission, oldest first.
    ///
    /// A missing or unreadable list reads as empty.
    #[must_use]
    pub fn list(&self) -> Vec<StoredSubmission> {
        let blob = match self.storage.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Could not read submissions");
                return Vec::new();
            }
        };

        serde_json::from_str(&blob).unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "Discarding unreadable submissions");
            Vec::new()
        })
    }

    /// Append a submission stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError`] if the list cannot be written.
    pub fn save(&self, submission: ProductSubmission) -> Result<StoredSubmission, SubmissionError> {
        let stored = StoredSubmission {
            submission,
            submission_date: Utc::now(),
        };

        let mut all = self.list();
        all.push(stored.clone());
        self.storage.set(&self.key, &serde_json::to_string(&all)?)?;

        info!(
            key = %self.key,
            product = %stored.submission.product_name,
            category = %stored.submission.category,
            new_category = stored.submission.is_new_category(),
            total = all.len(),
            "Saved product submission"
        );
        Ok(stored)
    }

    /// Delete every recorded submission.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::Storage`] if the list cannot be removed.
    pub fn clear(&self) -> Result<(), SubmissionError> {
        self.storage.remove(&self.key)?;
        info!(key = %self.key, "Cleared product submissions");
        Ok(())
    }
}
