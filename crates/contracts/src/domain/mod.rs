pub mod a001_department;
pub mod common;
