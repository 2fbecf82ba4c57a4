//! HTTP request handlers for the REST API.

pub mod assist;
pub mod draft;
