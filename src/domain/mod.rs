pub mod query;
pub mod student;

pub use query::*;
pub use student::*;
