pub(crate) mod auth;
pub(crate) mod categories;
pub(crate) mod items;
pub(crate) mod jobs;
pub(crate) mod multijobs;
pub(crate) mod scholarships;
pub(crate) mod subscribers;
pub(crate) mod upload;
pub(crate) mod users;
