pub mod api;
pub mod responses;
