pub mod assessment;
pub mod handlers;
pub mod insights;
pub mod models;
pub mod prompts;
pub mod store;
