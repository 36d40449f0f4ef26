pub mod draw;
pub mod map;
pub mod score;
pub mod search;
pub mod thermo;
