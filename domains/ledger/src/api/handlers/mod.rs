pub mod balance;
pub mod config;
pub mod daily;
pub mod history;
pub mod leaderboard;
pub mod role_rewards;
pub mod transfer;
