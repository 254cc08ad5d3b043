pub mod access;
pub mod book;
pub mod identity;
