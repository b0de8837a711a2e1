pub mod app;
pub mod backend;
pub mod dispatch;
pub mod poller;
