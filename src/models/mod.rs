pub mod attendance;
pub mod lecture;
pub mod student;
