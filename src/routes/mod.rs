pub mod auth;
pub mod categories;
pub mod items;
pub mod jobs;
pub mod multijobs;
pub mod scholarships;
pub mod subscribers;
pub mod users;
