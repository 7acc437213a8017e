use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use log::{error, warn};
use uuid::Uuid;

use super::EmployeeStore;
use crate::errors::{StoreError, StoreResult};
use crate::models::employee::{Employee, EmployeeFields, Photo};

type Item = HashMap<String, AttributeValue>;

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Sets each attribute separately so the write replaces fields, not the item.
/// The photo map is written whole; items stored without one would reject a
/// nested path.
const UPDATE_EXPRESSION: &str = "SET #photo = :photo, #full_name = :full_name, \
     #location = :location, #job_title = :job_title, #badges = :badges";

/// DynamoDB backend: one item per employee, keyed by a random UUID.
pub struct DynamoStore {
    client: DynamoClient,
    table: String,
}

impl DynamoStore {
    pub fn new(client: DynamoClient, table: String) -> Self {
        DynamoStore { client, table }
    }
}

fn key(employee_id: &str) -> AttributeValue {
    AttributeValue::S(employee_id.to_string())
}

pub fn employee_to_item(employee: &Employee) -> Item {
    HashMap::from([
        ("id".to_string(), key(&employee.id)),
        ("photo".to_string(), photo_to_attribute(&employee.photo.object_key)),
        ("full_name".to_string(), AttributeValue::S(employee.full_name.clone())),
        ("location".to_string(), AttributeValue::S(employee.location.clone())),
        ("job_title".to_string(), AttributeValue::S(employee.job_title.clone())),
        ("badges".to_string(), badges_to_attribute(&employee.badges)),
    ])
}

fn photo_to_attribute(object_key: &str) -> AttributeValue {
    AttributeValue::M(HashMap::from([(
        "object_key".to_string(),
        AttributeValue::S(object_key.to_string()),
    )]))
}

fn badges_to_attribute(badges: &[String]) -> AttributeValue {
    AttributeValue::L(badges.iter().cloned().map(AttributeValue::S).collect())
}

fn string_attribute(item: &Item, name: &str) -> StoreResult<String> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| StoreError::InvalidData(format!("attribute '{}' is missing or not a string", name)))
}

/// Reads an item back. A missing photo or badge list is treated as empty.
pub fn employee_from_item(item: &Item) -> StoreResult<Employee> {
    let object_key = item
        .get("photo")
        .and_then(|photo| photo.as_m().ok())
        .and_then(|photo| photo.get("object_key"))
        .and_then(|key| key.as_s().ok())
        .cloned()
        .unwrap_or_default();

    let badges = match item.get("badges") {
        None | Some(AttributeValue::Null(_)) => Vec::new(),
        Some(AttributeValue::L(values)) => values
            .iter()
            .map(|v| {
                v.as_s()
                    .cloned()
                    .map_err(|_| StoreError::InvalidData("badge is not a string".to_string()))
            })
            .collect::<StoreResult<Vec<_>>>()?,
        Some(AttributeValue::Ss(values)) => values.clone(),
        Some(_) => return Err(StoreError::InvalidData("attribute 'badges' is not a list".to_string())),
    };

    Ok(Employee {
        id: string_attribute(item, "id")?,
        photo: Photo { object_key },
        full_name: string_attribute(item, "full_name")?,
        location: string_attribute(item, "location")?,
        job_title: string_attribute(item, "job_title")?,
        badges,
    })
}

fn dynamo_error(context: &'static str, err: impl Into<crate::errors::BoxError> + std::fmt::Display) -> StoreError {
    error!("DynamoDB error ({}): {}", context, err);
    StoreError::unavailable(context, err)
}

#[async_trait]
impl EmployeeStore for DynamoStore {
    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        const CONTEXT: &str = "error to get employee list Scan";
        let mut employees = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| dynamo_error(CONTEXT, e))?;

            for item in output.items() {
                employees.push(employee_from_item(item)?);
            }

            match output.last_evaluated_key() {
                Some(last) if !last.is_empty() => start_key = Some(last.clone()),
                _ => break,
            }
        }

        Ok(employees)
    }

    async fn load_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key("id", key(employee_id))
            .send()
            .await
            .map_err(|e| dynamo_error("error to get employee data GetItem", e))?;

        output.item().map(employee_from_item).transpose()
    }

    async fn add_employee(&self, fields: &EmployeeFields) -> StoreResult<String> {
        let employee = Employee::new(Uuid::new_v4().to_string(), fields.clone());

        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(employee_to_item(&employee)))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(|e| dynamo_error("error to insert employee data PutItem", e))?;

        Ok(employee.id)
    }

    async fn update_employee(&self, employee_id: &str, fields: &EmployeeFields) -> StoreResult<()> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table)
            .key("id", key(employee_id))
            .update_expression(UPDATE_EXPRESSION)
            .condition_expression("attribute_exists(#id)")
            .expression_attribute_names("#id", "id")
            .expression_attribute_names("#photo", "photo")
            .expression_attribute_names("#full_name", "full_name")
            .expression_attribute_names("#location", "location")
            .expression_attribute_names("#job_title", "job_title")
            .expression_attribute_names("#badges", "badges")
            .expression_attribute_values(":photo", photo_to_attribute(&fields.object_key))
            .expression_attribute_values(":full_name", AttributeValue::S(fields.full_name.clone()))
            .expression_attribute_values(":location", AttributeValue::S(fields.location.clone()))
            .expression_attribute_values(":job_title", AttributeValue::S(fields.job_title.clone()))
            .expression_attribute_values(":badges", badges_to_attribute(&fields.badges))
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception()) =>
            {
                Err(StoreError::NotFound(employee_id.to_string()))
            }
            Err(err) => Err(dynamo_error("error to update employee data UpdateItem", err)),
        }
    }

    async fn delete_employee(&self, employee_id: &str) -> StoreResult<()> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key("id", key(employee_id))
            .send()
            .await
            .map_err(|e| dynamo_error("error to delete employee data DeleteItem", e))?;
        Ok(())
    }

    async fn is_healthy(&self) -> bool {
        let probe = self.client.describe_table().table_name(&self.table).send();
        match tokio::time::timeout(HEALTH_CHECK_TIMEOUT, probe).await {
            Ok(Ok(_)) => true,
            Ok(Err(err)) => {
                warn!("DynamoDB health check failed: {}", err);
                false
            }
            Err(_) => {
                warn!("DynamoDB health check timed out after {:?}", HEALTH_CHECK_TIMEOUT);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::contract_tests::{self, fields};

    /// Store backed by the table named in `TEST_DYNAMO_TABLE`, or `None` to skip.
    async fn live_store() -> Option<DynamoStore> {
        let table = std::env::var("TEST_DYNAMO_TABLE").ok()?;
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Some(DynamoStore::new(DynamoClient::new(&sdk_config), table))
    }

    #[test]
    fn item_layout_matches_the_table() {
        let employee = Employee::new("9b2c", fields("Jane Doe", "employee_pic/9b2c.png", &["plane"]));
        let item = employee_to_item(&employee);

        assert_eq!(item["id"], AttributeValue::S("9b2c".to_string()));
        let photo = item["photo"].as_m().unwrap();
        assert_eq!(photo["object_key"], AttributeValue::S("employee_pic/9b2c.png".to_string()));
        assert_eq!(item["badges"], AttributeValue::L(vec![AttributeValue::S("plane".to_string())]));
        assert_eq!(employee_from_item(&item).unwrap(), employee);
    }

    #[test]
    fn missing_photo_and_badges_read_as_empty() {
        let item: Item = HashMap::from([
            ("id".to_string(), AttributeValue::S("1".to_string())),
            ("full_name".to_string(), AttributeValue::S("Jane".to_string())),
            ("location".to_string(), AttributeValue::S("Porto".to_string())),
            ("job_title".to_string(), AttributeValue::S("Chef".to_string())),
        ]);

        let employee = employee_from_item(&item).unwrap();
        assert!(employee.photo.is_empty());
        assert!(employee.badges.is_empty());
    }

    #[test]
    fn update_writes_the_photo_map_whole() {
        assert!(UPDATE_EXPRESSION.starts_with("SET #photo = :photo,"));
        assert!(!UPDATE_EXPRESSION.contains("#photo."));
        assert_eq!(
            photo_to_attribute("employee_pic/1.png"),
            AttributeValue::M(HashMap::from([(
                "object_key".to_string(),
                AttributeValue::S("employee_pic/1.png".to_string()),
            )]))
        );
    }

    #[test]
    fn malformed_item_is_invalid_data() {
        let item: Item = HashMap::from([("id".to_string(), AttributeValue::N("1".to_string()))]);
        let err = employee_from_item(&item).unwrap_err();
        assert!(matches!(err, StoreError::InvalidData(_)));
    }

    #[tokio::test]
    async fn shared_contract() {
        let Some(store) = live_store().await else {
            eprintln!("TEST_DYNAMO_TABLE not set, skipping");
            return;
        };
        contract_tests::add_then_load_round_trips(&store).await;
        contract_tests::update_replaces_every_field(&store).await;
        contract_tests::delete_is_idempotent(&store).await;
        contract_tests::ids_are_never_reused(&store).await;
        contract_tests::list_contains_added_records(&store).await;
    }

    #[tokio::test]
    async fn update_repairs_item_stored_without_photo() {
        let Some(store) = live_store().await else {
            return;
        };
        let id = Uuid::new_v4().to_string();
        store
            .client
            .put_item()
            .table_name(&store.table)
            .item("id", key(&id))
            .item("full_name", AttributeValue::S("Jane".to_string()))
            .item("location", AttributeValue::S("Porto".to_string()))
            .item("job_title", AttributeValue::S("Chef".to_string()))
            .send()
            .await
            .unwrap();

        store
            .update_employee(&id, &fields("Jane Doe", "employee_pic/x.png", &["coffee"]))
            .await
            .unwrap();

        let saved = store.load_employee(&id).await.unwrap().unwrap();
        assert_eq!(saved.photo.object_key, "employee_pic/x.png");
        assert_eq!(saved.full_name, "Jane Doe");
        store.delete_employee(&id).await.unwrap();
    }

    #[tokio::test]
    async fn update_of_missing_item_is_not_found() {
        let Some(store) = live_store().await else {
            return;
        };
        let id = Uuid::new_v4().to_string();

        let err = store.update_employee(&id, &fields("Nobody", "", &[])).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(ref missing) if *missing == id));
        assert_eq!(store.load_employee(&id).await.unwrap(), None);
    }
}
