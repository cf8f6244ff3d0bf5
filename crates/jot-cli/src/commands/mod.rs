pub mod dispatch;
pub mod log;
pub mod resolve;
pub mod topics;
