pub mod aws;
pub mod thumbnail;
pub mod validation;
