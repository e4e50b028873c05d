pub mod analyze;
pub mod config;
pub mod dataset;
pub mod demo;
pub mod init;
