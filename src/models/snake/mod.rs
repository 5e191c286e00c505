pub mod direction;
pub mod food;
pub mod grid;
pub mod snake_game;
pub mod snake_player;
pub mod speed;
pub mod ticker;
