//! Auth Handlers

pub(crate) mod admin_exists;
pub(crate) mod change_password;
pub(crate) mod create_admin;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod me;
pub(crate) mod refresh;
pub(crate) mod register;
pub(crate) mod update_me;
