pub mod client;
pub mod error;
pub mod follow;
pub mod netrc;

/// The netrc machine key holding the Mattermost credentials.
pub const NETRC_MACHINE: &str = "mattermost";
