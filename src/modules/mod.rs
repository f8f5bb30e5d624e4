pub mod auth;
pub mod farmers;
pub mod payments;
pub mod work;
