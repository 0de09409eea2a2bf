pub mod capabilities;
pub mod entities;
pub mod requests;
