pub mod common;
pub mod providerdtos;
pub mod requestdtos;
pub mod userdtos;
