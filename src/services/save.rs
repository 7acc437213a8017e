//! The save pipeline: validate, create if needed, resize, upload, update.
//!
//! The steps touch two stores and are not atomic. When a new employee's photo
//! fails to resize or upload, the record created in the first step stays in
//! the store without a photo and the caller gets the error. A later edit
//! fixes it up.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::blob::{photo_key, BlobStore};
use crate::db::EmployeeStore;
use crate::errors::SaveError;
use crate::models::employee::EmployeeFields;
use crate::models::form::EmployeeSubmission;
use crate::utils::thumbnail::{ImageProcessor, THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH};
use crate::utils::validation::validate_submission;

pub const SAVED_MESSAGE: &str = "Saved!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub employee_id: String,
    pub created: bool,
    /// One-off confirmation for the next page the user sees.
    pub message: &'static str,
}

#[derive(Clone)]
pub struct SaveService {
    store: Arc<dyn EmployeeStore>,
    blobs: Arc<dyn BlobStore>,
    images: Arc<dyn ImageProcessor>,
}

impl SaveService {
    pub fn new(store: Arc<dyn EmployeeStore>, blobs: Arc<dyn BlobStore>, images: Arc<dyn ImageProcessor>) -> Self {
        SaveService { store, blobs, images }
    }

    pub async fn save(&self, submission: EmployeeSubmission) -> Result<SaveOutcome, SaveError> {
        let form = validate_submission(submission)?;

        let mut fields = EmployeeFields {
            object_key: String::new(),
            full_name: form.full_name,
            location: form.location,
            job_title: form.job_title,
            badges: form.badges,
        };

        let requested_id = form
            .employee_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        let (employee_id, created) = match requested_id {
            Some(id) => (id, false),
            None => {
                // The photo key embeds the id, so the record must exist first.
                let id = self.store.add_employee(&fields).await?;
                debug!("Created employee '{}' ahead of photo upload", id);
                (id, true)
            }
        };

        if let Some(photo) = form.photo {
            fields.object_key = self.store_photo(&employee_id, created, &photo).await?;
        }

        self.store.update_employee(&employee_id, &fields).await?;
        info!("Saved employee '{}' (created: {})", employee_id, created);

        Ok(SaveOutcome {
            employee_id,
            created,
            message: SAVED_MESSAGE,
        })
    }

    async fn store_photo(&self, employee_id: &str, created: bool, photo: &[u8]) -> Result<String, SaveError> {
        let thumbnail = self
            .images
            .resize(photo, THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT)
            .inspect_err(|err| {
                if created {
                    warn!("Employee '{}' was created but its photo could not be resized: {}", employee_id, err);
                }
            })?;

        let key = photo_key(employee_id);
        self.blobs
            .upload_object(&key, thumbnail)
            .await
            .inspect_err(|err| {
                if created {
                    warn!("Employee '{}' was created but its photo upload failed: {}", employee_id, err);
                }
            })?;
        debug!("Uploaded photo for employee '{}' to '{}'", employee_id, key);
        Ok(key)
    }
}
