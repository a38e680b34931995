//! Product Handlers

pub(crate) mod admin_index;
pub(crate) mod categories;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod mine;
pub(crate) mod related;
pub(crate) mod remove;
pub(crate) mod status;
pub(crate) mod update;
