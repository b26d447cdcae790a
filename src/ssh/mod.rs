use std::process::{Command, ExitStatus, Stdio};

use crate::{OwSshError, Result};

/// Printed before handing the terminal over to ssh
pub const CONNECT_BANNER: &str = "Attempting to SSH";

/// OS name as reported by OpsWorks, mapped to the distribution's login user.
///
/// See https://alestic.com/2014/01/ec2-ssh-username/ for the longer list;
/// only the distributions our stacks actually run are mapped here.
const SSH_USER_TABLE: &[(&str, &str)] = &[("Amazon Linux", "ec2-user"), ("ubuntu", "ubuntu")];

/// Resolve the SSH login user for a reported OS name.
///
/// Unrecognized names are a hard error, never a guessed default: logging in
/// as the wrong user just produces a confusing `Permission denied` later.
pub fn resolve_ssh_user(os_name: &str) -> Result<&'static str> {
    SSH_USER_TABLE
        .iter()
        .find(|(os, _)| *os == os_name)
        .map(|(_, user)| *user)
        .ok_or_else(|| OwSshError::UnsupportedOs(os_name.to_string()))
}

/// Build the `user@host` target string passed to ssh
pub fn connection_string(user: &str, ip: &str) -> String {
    format!("{}@{}", user, ip)
}

/// Start an interactive ssh session to `target`, inheriting the terminal.
///
/// The child's exit status is returned uninspected; the caller decides what
/// to do with it (we propagate it as our own exit code).
pub fn launch(target: &str) -> Result<ExitStatus> {
    println!("{}: {}", CONNECT_BANNER, target);

    Command::new("ssh")
        .arg(target)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| OwSshError::SshCommand(e.to_string()))
}
