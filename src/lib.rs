pub mod config;
pub mod feed;
pub mod form;
pub mod http_api;
pub mod http_client;
pub mod injury;
pub mod leaderboard;
pub mod mock_api;
pub mod profile;
pub mod remote;
pub mod report;
pub mod session;
pub mod state;
pub mod upload;
