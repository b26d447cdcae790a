use std::collections::HashMap;
use std::process::ExitStatus;

use aws_sdk_opsworks::types::{Instance, Stack};

use crate::aws::client::AwsClients;
use crate::aws::opsworks;
use crate::ssh;
use crate::ui::{create_spinner, fuzzy_pick};
use crate::{OwSshError, Result};

/// Connection info for one instance, kept only for the lifetime of a run
#[derive(Debug)]
pub struct ConnectTarget {
    pub ip: String,
    pub os: String,
}

/// Full workflow: pick a stack, pick an instance, resolve the user, run ssh.
///
/// Returns `None` if the operator cancelled either picker (a deliberate
/// no-op), or the ssh child's exit status once the session ends. All
/// termination decisions are left to `main`.
pub async fn execute(profile: String, region: String) -> Result<Option<ExitStatus>> {
    let spinner = create_spinner("Connecting to AWS...");
    let clients = AwsClients::new(&profile, &region).await?;
    spinner.finish_with_message(format!(
        "Connected to AWS ({}, {})",
        clients.profile, clients.region
    ));

    let Some(stack_id) = select_stack(&clients).await? else {
        return Ok(None);
    };

    let Some(target) = select_instance(&clients, &stack_id).await? else {
        return Ok(None);
    };

    let user = ssh::resolve_ssh_user(&target.os)?;
    let status = ssh::launch(&ssh::connection_string(user, &target.ip))?;

    Ok(Some(status))
}

/// Let the operator pick a stack; returns its stack id, or `None` on cancel
async fn select_stack(clients: &AwsClients) -> Result<Option<String>> {
    let spinner = create_spinner("Fetching OpsWorks stacks...");
    let stacks = opsworks::describe_stacks(clients).await?;
    spinner.finish_with_message(format!("Found {} stack(s)", stacks.len()));

    let (names, mut ids) = stack_choices(&stacks);

    let Some(name) = fuzzy_pick("Select a stack", &names)? else {
        return Ok(None);
    };

    // The picker only offers names present in the map, so this lookup cannot
    // miss; a miss is treated like a cancelled prompt rather than a crash.
    Ok(ids.remove(&name))
}

/// Let the operator pick an instance in `stack_id`; `None` on cancel
async fn select_instance(clients: &AwsClients, stack_id: &str) -> Result<Option<ConnectTarget>> {
    let spinner = create_spinner("Fetching instances...");
    let instances = opsworks::describe_instances(clients, stack_id).await?;
    spinner.finish_with_message(format!("Found {} instance(s)", instances.len()));

    let (hostnames, mut targets) = instance_choices(&instances)?;

    let Some(hostname) = fuzzy_pick("Select an instance", &hostnames)? else {
        return Ok(None);
    };

    Ok(targets.remove(&hostname))
}

/// Build the picker entries for a stack listing.
///
/// Returns the display names in listing order plus a name-to-id map. Stacks
/// are keyed by display name, which AWS does not make unique: on a duplicate
/// the later record's id wins and the name is listed once.
fn stack_choices(stacks: &[Stack]) -> (Vec<String>, HashMap<String, String>) {
    let mut names = Vec::new();
    let mut ids = HashMap::new();

    for stack in stacks {
        let (Some(name), Some(id)) = (stack.name(), stack.stack_id()) else {
            continue;
        };
        if ids.insert(name.to_string(), id.to_string()).is_none() {
            names.push(name.to_string());
        }
    }

    (names, ids)
}

/// Build the picker entries for an instance listing.
///
/// Every instance must carry a hostname, a private IP and a reported OS
/// name; a record missing any of these means the API returned a shape we
/// cannot safely connect with, so the record is dumped for diagnosis and the
/// whole run fails. Hostname collisions are last-write-wins, same as stacks.
fn instance_choices(
    instances: &[Instance],
) -> Result<(Vec<String>, HashMap<String, ConnectTarget>)> {
    let mut hostnames = Vec::new();
    let mut targets = HashMap::new();

    for instance in instances {
        let hostname = required_field(instance, instance.hostname(), "Hostname")?;
        let ip = required_field(instance, instance.private_ip(), "PrivateIp")?;
        let os = required_field(
            instance,
            instance.reported_os().and_then(|os| os.name()),
            "ReportedOs.Name",
        )?;

        let target = ConnectTarget {
            ip: ip.to_string(),
            os: os.to_string(),
        };
        if targets.insert(hostname.to_string(), target).is_none() {
            hostnames.push(hostname.to_string());
        }
    }

    Ok((hostnames, targets))
}

fn required_field<'a>(
    record: &Instance,
    value: Option<&'a str>,
    field: &'static str,
) -> Result<&'a str> {
    value.ok_or_else(|| {
        eprintln!("{:#?}", record);
        OwSshError::MalformedInstance(field)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_opsworks::types::ReportedOs;

    fn stack(name: &str, id: &str) -> Stack {
        Stack::builder().name(name).stack_id(id).build()
    }

    fn instance(hostname: &str, ip: &str, os: &str) -> Instance {
        Instance::builder()
            .hostname(hostname)
            .private_ip(ip)
            .reported_os(ReportedOs::builder().name(os).build())
            .build()
    }

    #[test]
    fn test_stack_choices_unique_names() {
        let stacks = vec![stack("Web", "id-1"), stack("Workers", "id-2")];
        let (names, ids) = stack_choices(&stacks);

        assert_eq!(names, vec!["Web", "Workers"]);
        assert_eq!(ids.len(), 2);
        assert_eq!(ids["Web"], "id-1");
        assert_eq!(ids["Workers"], "id-2");
    }

    #[test]
    fn test_stack_choices_duplicate_name_last_wins() {
        let stacks = vec![stack("Web", "id-1"), stack("Web", "id-2")];
        let (names, ids) = stack_choices(&stacks);

        assert_eq!(names, vec!["Web"]);
        assert_eq!(ids.len(), 1);
        assert_eq!(ids["Web"], "id-2");
    }

    #[test]
    fn test_stack_choices_skips_incomplete_records() {
        let stacks = vec![Stack::builder().name("half-built").build(), stack("Web", "id-1")];
        let (names, ids) = stack_choices(&stacks);

        assert_eq!(names, vec!["Web"]);
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn test_instance_choices() {
        let instances = vec![
            instance("web-01", "10.0.0.5", "ubuntu"),
            instance("app1", "10.1.2.3", "Amazon Linux"),
        ];
        let (hostnames, targets) = instance_choices(&instances).unwrap();

        assert_eq!(hostnames, vec!["web-01", "app1"]);
        assert_eq!(targets["web-01"].ip, "10.0.0.5");
        assert_eq!(targets["web-01"].os, "ubuntu");
        assert_eq!(targets["app1"].ip, "10.1.2.3");
        assert_eq!(targets["app1"].os, "Amazon Linux");
    }

    #[test]
    fn test_instance_choices_duplicate_hostname_last_wins() {
        let instances = vec![
            instance("web-01", "10.0.0.5", "ubuntu"),
            instance("web-01", "10.0.0.6", "ubuntu"),
        ];
        let (hostnames, targets) = instance_choices(&instances).unwrap();

        assert_eq!(hostnames, vec!["web-01"]);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets["web-01"].ip, "10.0.0.6");
    }

    #[test]
    fn test_instance_choices_missing_private_ip_fails() {
        let instances = vec![Instance::builder()
            .hostname("web-01")
            .reported_os(ReportedOs::builder().name("ubuntu").build())
            .build()];

        let err = instance_choices(&instances).unwrap_err();
        assert!(matches!(err, OwSshError::MalformedInstance("PrivateIp")));
    }

    #[test]
    fn test_instance_choices_missing_reported_os_fails() {
        let instances = vec![Instance::builder()
            .hostname("web-01")
            .private_ip("10.0.0.5")
            .build()];

        let err = instance_choices(&instances).unwrap_err();
        assert!(matches!(err, OwSshError::MalformedInstance("ReportedOs.Name")));
    }

    #[test]
    fn test_amazon_linux_instance_resolves_to_full_target() {
        let instances = vec![instance("app1", "10.1.2.3", "Amazon Linux")];
        let (_, targets) = instance_choices(&instances).unwrap();

        let target = &targets["app1"];
        let user = ssh::resolve_ssh_user(&target.os).unwrap();
        let connect = ssh::connection_string(user, &target.ip);

        assert_eq!(connect, "ec2-user@10.1.2.3");
        assert_eq!(
            format!("{}: {}", ssh::CONNECT_BANNER, connect),
            "Attempting to SSH: ec2-user@10.1.2.3"
        );
    }
}
