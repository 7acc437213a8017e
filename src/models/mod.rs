pub mod badge;
pub mod employee;
pub mod form;
