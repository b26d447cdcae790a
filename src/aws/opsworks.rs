use aws_sdk_opsworks::types::{Instance, Stack};

use super::client::AwsClients;
use crate::{OwSshError, Result};

/// List all OpsWorks stacks visible to the active account/region
pub async fn describe_stacks(clients: &AwsClients) -> Result<Vec<Stack>> {
    let output = clients
        .opsworks
        .describe_stacks()
        .send()
        .await
        .map_err(OwSshError::opsworks)?;

    Ok(output.stacks().to_vec())
}

/// List all instances belonging to a stack
pub async fn describe_instances(clients: &AwsClients, stack_id: &str) -> Result<Vec<Instance>> {
    let output = clients
        .opsworks
        .describe_instances()
        .stack_id(stack_id)
        .send()
        .await
        .map_err(OwSshError::opsworks)?;

    Ok(output.instances().to_vec())
}
