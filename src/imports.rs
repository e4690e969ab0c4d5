pub mod activity;
pub mod deployer;
