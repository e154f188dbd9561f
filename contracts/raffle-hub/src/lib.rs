pub mod clients;
pub mod contract;
pub mod error;
pub mod events;
pub mod execute;
pub mod msg;
pub mod query;
pub mod state;
