use aws_config::BehaviorVersion;
use aws_sdk_opsworks::Client as OpsWorksClient;
use aws_sdk_sts::Client as StsClient;

use crate::{OwSshError, Result};

/// AWS client wrapper for one profile/region pair
pub struct AwsClients {
    pub opsworks: OpsWorksClient,
    pub profile: String,
    pub region: String,
}

impl AwsClients {
    /// Create new AWS clients for a named profile and region
    pub async fn new(profile: &str, region: &str) -> Result<Self> {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(profile)
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;

        // Verify credentials by getting caller identity before any prompt
        StsClient::new(&config)
            .get_caller_identity()
            .send()
            .await
            .map_err(|_| OwSshError::AwsCredentials)?;

        Ok(Self {
            opsworks: OpsWorksClient::new(&config),
            profile: profile.to_string(),
            region: region.to_string(),
        })
    }
}
