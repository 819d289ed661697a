// Impact inventory: the user's raw achievements, plus the skills derived from them.

pub mod handlers;
pub mod models;
pub mod skills;
pub mod store;
