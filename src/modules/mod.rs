pub mod access;
pub mod managers;
pub mod permissions;
