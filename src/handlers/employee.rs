use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use serde::Serialize;
use serde_json::json;

use super::AppState;
use crate::errors::AppError;
use crate::models::badge::BADGES;
use crate::models::form::{
    EmployeeSubmission, BADGES_FIELD, EMPLOYEE_ID_FIELD, FULL_NAME_FIELD, JOB_TITLE_FIELD,
    LOCATION_FIELD, PHOTO_FIELD,
};
use crate::services::directory;

pub const DELETED_MESSAGE: &str = "Deleted!";

#[derive(Serialize)]
struct SaveResponse {
    id: String,
    message: &'static str,
}

pub async fn list_employees(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let employees = directory::list_views(state.store.as_ref(), state.blobs.as_ref()).await?;
    Ok(HttpResponse::Ok().json(employees))
}

pub async fn get_employee(
    state: web::Data<AppState>,
    employee_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee_id = employee_id.into_inner();
    match directory::load_view(state.store.as_ref(), state.blobs.as_ref(), &employee_id).await? {
        Some(employee) => Ok(HttpResponse::Ok().json(employee)),
        None => Err(AppError::NotFound("employee not found".to_string())),
    }
}

pub async fn save_employee(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let submission = read_submission(&mut payload, state.max_request_bytes).await?;
    let outcome = state.saver.save(submission).await?;

    let body = SaveResponse {
        id: outcome.employee_id,
        message: outcome.message,
    };
    if outcome.created {
        Ok(HttpResponse::Created().json(body))
    } else {
        Ok(HttpResponse::Ok().json(body))
    }
}

pub async fn delete_employee(
    state: web::Data<AppState>,
    employee_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.store.delete_employee(&employee_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": DELETED_MESSAGE,
    })))
}

pub async fn list_badges() -> HttpResponse {
    HttpResponse::Ok().json(BADGES)
}

/// Drains the multipart body into a submission, giving up once more than
/// `limit` bytes of field data have arrived.
async fn read_submission(payload: &mut Multipart, limit: usize) -> Result<EmployeeSubmission, AppError> {
    let mut submission = EmployeeSubmission::default();
    let mut total = 0usize;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|err| AppError::BadRequest(format!("error to parse form data: {}", err)))?;
        let disposition = field.content_disposition();
        let name = disposition.get_name().unwrap_or_default().to_string();
        let has_filename = disposition.get_filename().is_some_and(|f| !f.is_empty());

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|err| AppError::BadRequest(format!("error to parse form data: {}", err)))?;
            total += chunk.len();
            if total > limit {
                return Err(AppError::PayloadTooLarge(format!(
                    "request body exceeds {} bytes",
                    limit
                )));
            }
            data.extend_from_slice(&chunk);
        }

        if name == PHOTO_FIELD {
            if has_filename {
                submission.photo = Some(data);
            }
            continue;
        }

        let value = String::from_utf8(data)
            .map_err(|_| AppError::BadRequest(format!("'{}' field is not valid UTF-8", name)))?;
        match name.as_str() {
            EMPLOYEE_ID_FIELD => submission.employee_id = Some(value),
            FULL_NAME_FIELD => submission.full_name = value,
            LOCATION_FIELD => submission.location = value,
            JOB_TITLE_FIELD => submission.job_title = value,
            BADGES_FIELD => submission.badges.push(value),
            _ => log::debug!("Ignoring unexpected form field '{}'", name),
        }
    }

    Ok(submission)
}
