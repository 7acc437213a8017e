use aws_config::{BehaviorVersion, ConfigLoader, SdkConfig};
use aws_types::region::Region;

use crate::config::Config;

/// Shared SDK configuration for the S3 and DynamoDB clients. Credentials come
/// from the default provider chain; the region can be pinned by config.
pub async fn load_sdk_config(config: &Config) -> SdkConfig {
    ConfigLoader::default()
        .region(config.aws_region.clone().map(Region::new))
        .behavior_version(BehaviorVersion::latest())
        .load()
        .await
}
