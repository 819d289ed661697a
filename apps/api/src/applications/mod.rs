pub mod comms;
pub mod follow_up;
pub mod handlers;
pub mod store;
