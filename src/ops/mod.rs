pub mod derive;
pub mod index;
pub mod tags;
