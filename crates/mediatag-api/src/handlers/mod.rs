pub mod media;
pub mod tags;
