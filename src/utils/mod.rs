pub mod fs;
pub mod validation;
