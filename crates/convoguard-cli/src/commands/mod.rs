pub mod failover;
pub mod policy;
pub mod transcript;
