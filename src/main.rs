use env_logger::Env;
use gridsnake::{app::State, models::snake::snake_game::SnakeParams};
use iced::Task;
use log::debug;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("gridsnake=info")).init();
    debug!("Debug on");
    let state = State::new(SnakeParams::default())?;
    iced::application("Snake", State::update, State::view)
        .window_size(iced::Size::new(640.0, 760.0))
        .subscription(State::subscription)
        .run_with(move || (state, Task::none()))?;
    Ok(())
}
