pub mod canonicalize;
pub mod check;
pub mod profile;
pub mod sign;
pub mod trusty;
