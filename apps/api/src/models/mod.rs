pub mod application;
pub mod contact;
pub mod cv;
pub mod inventory;
pub mod plan;
pub mod radar;
pub mod report;
