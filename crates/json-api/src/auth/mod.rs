//! Authentication

pub(crate) mod errors;
mod handlers;
pub(crate) mod middleware;
pub(crate) mod models;
pub(crate) mod roles;

pub(crate) use handlers::*;
