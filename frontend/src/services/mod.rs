pub mod config;
pub mod dom;
pub mod form_relay;
pub mod logging;
pub mod storage;
