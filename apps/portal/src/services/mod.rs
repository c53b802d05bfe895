pub mod analytics;
pub mod auth;
pub mod intake;
pub mod objectives;
pub mod requests;
pub mod search;
