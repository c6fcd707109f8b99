pub mod gps_location;
pub mod message;
pub mod principal;
pub mod vehicle;
