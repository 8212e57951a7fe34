pub mod config;
pub mod mock_stt;
pub mod server;
