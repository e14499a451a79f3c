pub mod artist_response;
pub mod common;
pub mod page;
pub mod show_response;
pub mod venue_response;

pub use page::{Empty, Page};
