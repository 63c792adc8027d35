pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod rest;
pub mod shutdown;
pub mod store;
