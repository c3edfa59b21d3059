pub mod client;
pub mod env;
pub mod err_log;
pub mod service_details;
pub mod session;
pub mod table;
