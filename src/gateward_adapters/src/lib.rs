pub mod config;
pub mod email;
pub mod persistence;

pub use self::config::{EmailServerConfig, Settings};
pub use email::{JobQueueEmailClient, MockEmailClient};
pub use persistence::{DashMapSessionStore, HashMapUserRepository};
