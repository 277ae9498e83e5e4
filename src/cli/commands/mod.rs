pub mod attend;
pub mod code;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod leaderboard;
pub mod list;
pub mod log;
pub mod repair;
pub mod seed;
