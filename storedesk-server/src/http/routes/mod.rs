//! Route handlers organized by resource

pub mod health;
pub mod home;
pub mod managers;
pub mod products;
pub mod stores;
