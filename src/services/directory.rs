//! Read paths that attach signed photo URLs to stored records.

use crate::blob::BlobStore;
use crate::db::EmployeeStore;
use crate::errors::StoreResult;
use crate::models::employee::{Employee, EmployeeView};

/// A signing failure does not fail the read: its message takes the URL's place.
pub async fn with_photo_url(blobs: &dyn BlobStore, employee: Employee) -> EmployeeView {
    let photo_url = if employee.photo.is_empty() {
        None
    } else {
        match blobs.generate_presigned_url(&employee.photo.object_key).await {
            Ok(url) => Some(url),
            Err(err) => {
                log::warn!("Could not sign photo for employee '{}': {}", employee.id, err);
                Some(err.to_string())
            }
        }
    };
    EmployeeView { employee, photo_url }
}

pub async fn list_views(store: &dyn EmployeeStore, blobs: &dyn BlobStore) -> StoreResult<Vec<EmployeeView>> {
    let employees = store.list_employees().await?;
    let mut views = Vec::with_capacity(employees.len());
    for employee in employees {
        views.push(with_photo_url(blobs, employee).await);
    }
    Ok(views)
}

pub async fn load_view(
    store: &dyn EmployeeStore,
    blobs: &dyn BlobStore,
    employee_id: &str,
) -> StoreResult<Option<EmployeeView>> {
    match store.load_employee(employee_id).await? {
        Some(employee) => Ok(Some(with_photo_url(blobs, employee).await)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::MemoryBlobStore;
    use crate::db::contract_tests::fields;
    use crate::db::MemoryStore;

    #[tokio::test]
    async fn photos_are_signed_and_dangling_keys_degrade() {
        let store = MemoryStore::new();
        let blobs = MemoryBlobStore::default();
        let without = store.add_employee(&fields("No Photo", "", &[])).await.unwrap();
        let with = store.add_employee(&fields("Photo", "employee_pic/1.png", &[])).await.unwrap();
        let dangling = store.add_employee(&fields("Dangling", "employee_pic/2.png", &[])).await.unwrap();
        blobs.upload_object("employee_pic/1.png", vec![1]).await.unwrap();

        let views = list_views(&store, &blobs).await.unwrap();
        let url_of = |id: &str| views.iter().find(|v| v.employee.id == id).unwrap().photo_url.clone();

        assert_eq!(url_of(&without), None);
        assert_eq!(url_of(&with).as_deref(), Some("memory://employee_pic/1.png?expires_in=120"));
        assert_eq!(
            url_of(&dangling).as_deref(),
            Some("object 'employee_pic/2.png' does not exist")
        );
    }

    #[tokio::test]
    async fn load_view_of_unknown_id_is_none() {
        let store = MemoryStore::new();
        let blobs = MemoryBlobStore::default();
        assert_eq!(load_view(&store, &blobs, "5").await.unwrap(), None);
    }
}
