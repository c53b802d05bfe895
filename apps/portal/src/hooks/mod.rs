pub mod assistant;
pub mod insights;
pub mod requests;
pub mod search;
pub mod theme;
