use validator::Validate;

pub const EMPLOYEE_ID_FIELD: &str = "employee_id";
pub const FULL_NAME_FIELD: &str = "full_name";
pub const LOCATION_FIELD: &str = "location";
pub const JOB_TITLE_FIELD: &str = "job_title";
pub const BADGES_FIELD: &str = "badges";
pub const PHOTO_FIELD: &str = "photo";

pub const FULL_NAME_LABEL: &str = "Full Name";
pub const LOCATION_LABEL: &str = "Location";
pub const JOB_TITLE_LABEL: &str = "Job Title";
pub const PHOTO_LABEL: &str = "Picture";

/// Raw values of one save submission, as pulled off the multipart body.
#[derive(Debug, Clone, Default)]
pub struct EmployeeSubmission {
    pub employee_id: Option<String>,
    pub full_name: String,
    pub location: String,
    pub job_title: String,
    pub badges: Vec<String>,
    pub photo: Option<Vec<u8>>,
}

/// A submission after normalization. Only `validate_submission` builds one
/// that has passed the checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct SanitizedForm {
    pub employee_id: Option<String>,
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(length(min = 1))]
    pub job_title: String,
    pub badges: Vec<String>,
    /// Raw upload; resizing happens in the save pipeline.
    pub photo: Option<Vec<u8>>,
}
