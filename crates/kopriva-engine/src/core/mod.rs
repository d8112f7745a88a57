pub mod camera;
pub mod shuffle;
pub mod time;
pub mod world;
