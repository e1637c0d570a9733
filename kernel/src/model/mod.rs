pub mod auth;
pub mod booking;
pub mod contact;
pub mod hall;
pub mod id;
