use image::ImageFormat;
use validator::Validate;

use crate::errors::ValidationError;
use crate::models::badge;
use crate::models::form::{
    EmployeeSubmission, SanitizedForm, FULL_NAME_FIELD, FULL_NAME_LABEL, JOB_TITLE_FIELD,
    JOB_TITLE_LABEL, LOCATION_FIELD, LOCATION_LABEL, PHOTO_LABEL,
};

/// Trims and collapses every internal whitespace run to one space.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sniffs the payload and accepts only image formats the thumbnailer can read.
fn is_decodable_image(bytes: &[u8]) -> bool {
    infer::get(bytes)
        .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
        .and_then(|kind| ImageFormat::from_mime_type(kind.mime_type()))
        .is_some_and(|format| format.reading_enabled())
}

/// Normalizes a submission and checks it field by field. The first failing
/// field is reported; unknown badges are dropped without an error.
pub fn validate_submission(submission: EmployeeSubmission) -> Result<SanitizedForm, ValidationError> {
    let mut form = SanitizedForm {
        employee_id: submission.employee_id,
        full_name: collapse_whitespace(&submission.full_name),
        location: collapse_whitespace(&submission.location),
        job_title: collapse_whitespace(&submission.job_title),
        badges: Vec::new(),
        photo: None,
    };

    if let Err(errors) = form.validate() {
        let failed = errors.field_errors();
        let first = [
            (FULL_NAME_FIELD, FULL_NAME_LABEL),
            (LOCATION_FIELD, LOCATION_LABEL),
            (JOB_TITLE_FIELD, JOB_TITLE_LABEL),
        ]
        .into_iter()
        .find(|(field, _)| failed.contains_key(field));
        if let Some((_, label)) = first {
            return Err(ValidationError::Missing(label));
        }
    }

    for tag in &submission.badges {
        let tag = tag.trim();
        if badge::is_known(tag) && !form.badges.iter().any(|b| b == tag) {
            form.badges.push(tag.to_string());
        }
    }

    if let Some(photo) = submission.photo.filter(|bytes| !bytes.is_empty()) {
        if !is_decodable_image(&photo) {
            return Err(ValidationError::NotAnImage(PHOTO_LABEL));
        }
        form.photo = Some(photo);
    }

    Ok(form)
}
