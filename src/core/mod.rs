pub mod audit;
pub mod codes;
pub mod export;
pub mod leaderboard;
pub mod otp;
pub mod repair;
pub mod seed;
pub mod streak;
pub mod verify;
