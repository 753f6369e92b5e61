pub mod event;
pub mod preference;
pub mod profile;
