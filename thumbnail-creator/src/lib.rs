//! Adds thumbnail datastream references to repository objects, pointing at
//! the image viewer's thumbnail endpoint.

pub mod client;
pub mod config;
pub mod domain;
pub mod logging;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod test_log;
