pub mod auth;
pub mod default_route;
pub mod student_route;
pub mod validate_route;
