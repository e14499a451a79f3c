pub mod prelude;

pub mod artist;
pub mod genres;
pub mod show;
pub mod venue;

pub mod artist_local_model;
pub mod show_local_model;
pub mod venue_local_model;
