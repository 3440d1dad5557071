pub mod errors;
pub mod intake;
pub mod models;
pub mod parser;
pub mod registry;
pub mod services;
pub mod session;
pub mod transport;
