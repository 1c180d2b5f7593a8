pub mod api;
pub mod category;
pub mod comment;
pub mod review;
pub mod user;
