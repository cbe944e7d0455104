pub mod auth;
pub mod clazz;
pub mod dash;
pub mod dept;
pub mod emp;
pub mod log;
pub mod reference;
pub mod student;
