use serde::{Deserialize, Serialize};

/// Reference to the employee's photo in the blob store. An empty key means the
/// employee has no photo.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Photo {
    pub object_key: String,
}

impl Photo {
    pub fn is_empty(&self) -> bool {
        self.object_key.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: String,
    pub photo: Photo,
    pub full_name: String,
    pub location: String,
    pub job_title: String,
    pub badges: Vec<String>,
}

impl Employee {
    pub fn new(id: impl Into<String>, fields: EmployeeFields) -> Self {
        Employee {
            id: id.into(),
            photo: Photo {
                object_key: fields.object_key,
            },
            full_name: fields.full_name,
            location: fields.location,
            job_title: fields.job_title,
            badges: fields.badges,
        }
    }

    /// Overwrites every mutable field. The id is left untouched.
    pub fn apply(&mut self, fields: EmployeeFields) {
        self.photo.object_key = fields.object_key;
        self.full_name = fields.full_name;
        self.location = fields.location;
        self.job_title = fields.job_title;
        self.badges = fields.badges;
    }
}

/// The mutable part of an employee record, as written by `add_employee` and
/// `update_employee`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFields {
    pub object_key: String,
    pub full_name: String,
    pub location: String,
    pub job_title: String,
    pub badges: Vec<String>,
}

/// Display projection of an employee. `photo_url` is resolved on every read and
/// never written back to a store.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EmployeeView {
    #[serde(flatten)]
    pub employee: Employee,
    /// Signed URL, or the signing error text when the photo could not be signed.
    pub photo_url: Option<String>,
}
