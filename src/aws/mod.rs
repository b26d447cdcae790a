pub mod client;
pub mod opsworks;
