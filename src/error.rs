use thiserror::Error;

#[derive(Error, Debug)]
pub enum OwSshError {
    // AWS Errors
    #[error("AWS OpsWorks error: {0}")]
    OpsWorks(String),

    #[error("AWS credentials not found or invalid")]
    AwsCredentials,

    // Selection Errors
    #[error("instance record is missing required field '{0}' (record dumped above)")]
    MalformedInstance(&'static str),

    #[error("unsupported operating system: '{0}' (no SSH user mapping)")]
    UnsupportedOs(String),

    // UI Errors
    #[error("prompt error: {0}")]
    Prompt(String),

    // SSH Errors
    #[error("failed to launch ssh: {0}")]
    SshCommand(String),
}

macro_rules! format_sdk_error {
    ($sdk:ident, $err:expr) => {{
        use $sdk::error::SdkError;
        match &$err {
            SdkError::ServiceError(service_err) => format!("{:?}", service_err.err()),
            SdkError::TimeoutError(_) => "Request timed out".to_string(),
            SdkError::DispatchFailure(dispatch) => {
                if dispatch.is_io() {
                    "Network error - please check your connection".to_string()
                } else if dispatch.is_timeout() {
                    "Connection timed out".to_string()
                } else {
                    format!("Connection error: {:?}", dispatch)
                }
            }
            SdkError::ConstructionFailure(_) => "Failed to construct request".to_string(),
            SdkError::ResponseError(resp) => format!("Response error: {:?}", resp),
            _ => $err.to_string(),
        }
    }};
}

impl OwSshError {
    pub fn opsworks<E, R>(err: aws_sdk_opsworks::error::SdkError<E, R>) -> Self
    where
        E: std::fmt::Debug,
        R: std::fmt::Debug,
    {
        OwSshError::OpsWorks(format_sdk_error!(aws_sdk_opsworks, err))
    }

    pub fn prompt(err: dialoguer::Error) -> Self {
        OwSshError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OwSshError>;
