#![doc = "The `todoapp` library crate."]
#![doc = ""]
#![doc = "Owner-scoped todo lists behind bearer-token authentication, an admin role that"]
#![doc = "can see and delete every todo, password management, and an in-memory demo book"]
#![doc = "catalog. The binary (`main.rs`) wires configuration, the database pool and the"]
#![doc = "routes defined here into an Actix Web server."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod validation;

pub use crate::error::AppError;
