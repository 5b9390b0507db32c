pub mod permissions;
pub mod role_forms;
pub mod roles;
