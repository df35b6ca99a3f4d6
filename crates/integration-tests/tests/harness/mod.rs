pub mod config;
pub mod mock_deepgram;
pub mod server;
