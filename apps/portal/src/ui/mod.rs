pub mod analytics;
pub mod chat;
pub mod dashboard;
pub mod login;
pub mod navigation;
pub mod new_request;
pub mod notifications;
pub mod placeholders;
pub mod requests;
pub mod shell;
pub mod territory;
