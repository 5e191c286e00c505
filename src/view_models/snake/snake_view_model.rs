use iced::{
    futures::{SinkExt, Stream},
    keyboard::{key::Named, Key},
    stream,
};
use log::{debug, error, info};
use tokio::time::{self, MissedTickBehavior};

use crate::{
    app::Message,
    models::snake::{
        direction::Direction,
        snake_game::{SessionState, SnakeError, SnakeGame, SnakeInput, SnakeParams},
        ticker::TickHandle,
    },
    view_model::ViewModel,
    views::snake::snake_game_screen::SnakeMessage,
};

#[derive(Debug)]
pub struct SnakeViewModel {
    game: SnakeGame,
}

impl SnakeViewModel {
    /// Creates a new view model with the given paramters.
    ///
    /// # Errors
    ///
    /// If the parameters are invalid and a [`SnakeGame`] cannot
    /// be created, returns a [`SnakeError`].
    pub fn new(params: SnakeParams) -> Result<Self, SnakeError> {
        Ok(Self::from_game(SnakeGame::new(params)?))
    }

    #[must_use]
    pub fn from_game(game: SnakeGame) -> Self {
        Self { game }
    }

    #[must_use]
    pub fn get_game(&self) -> &SnakeGame {
        &self.game
    }

    #[must_use]
    pub fn get_tick_handle(&self) -> Option<TickHandle> {
        self.game.tick_handle()
    }

    /// Arrow keys and WASD steer the snake.
    #[must_use]
    pub fn direction_for_key(key: &Key) -> Option<Direction> {
        match key {
            Key::Named(code) => match code {
                Named::ArrowUp => Some(Direction::Up),
                Named::ArrowDown => Some(Direction::Down),
                Named::ArrowLeft => Some(Direction::Left),
                Named::ArrowRight => Some(Direction::Right),
                _ => None,
            },
            Key::Character(c) => match c.as_str() {
                "w" | "W" => Some(Direction::Up),
                "s" | "S" => Some(Direction::Down),
                "a" | "A" => Some(Direction::Left),
                "d" | "D" => Some(Direction::Right),
                _ => None,
            },
            Key::Unidentified => None,
        }
    }

    /// Stream of ticks for `handle`, each stamped with its generation. The
    /// first tick fires one interval after the stream starts.
    pub fn make_tick_stream(handle: TickHandle) -> impl Stream<Item = Message> {
        stream::channel(1, move |mut output| async move {
            let period = handle.interval();
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if let Err(e) = output
                    .send(Message::Snake(SnakeMessage::Tick(handle.generation())))
                    .await
                {
                    debug!("Tick stream {} closed: {e}", handle.generation());
                    break;
                }
            }
        })
    }

    fn apply(&mut self, input: SnakeInput) {
        match self.game.apply_input(input) {
            Ok(true) => debug!("Applied {:?}", input),
            Ok(false) => debug!("Ignored {:?} while {:?}", input, self.game.state()),
            Err(e) => error!("Problem applying {:?}: {e}", input),
        }
    }

    fn handle_key(&mut self, key: &Key) -> Option<Message> {
        if let Some(direction) = Self::direction_for_key(key) {
            self.apply(SnakeInput::Turn(direction));
            return None;
        }
        match (self.game.state(), key) {
            (SessionState::Idle, Key::Named(Named::Space)) => {
                Some(Message::Snake(SnakeMessage::Start))
            }
            (SessionState::Over, Key::Named(Named::Space | Named::Enter)) => {
                Some(Message::Snake(SnakeMessage::Acknowledge))
            }
            _ => None,
        }
    }
}

impl ViewModel for SnakeViewModel {
    fn update(&mut self, message: Message) -> Option<Message> {
        let Message::Snake(snake_message) = message;
        match snake_message {
            SnakeMessage::Key(key) => self.handle_key(&key),
            SnakeMessage::Tick(generation) => {
                if let Some(report) = self.game.on_timer(generation) {
                    if let Some(over) = report.game_over {
                        info!("Round finished with score {}", over.score);
                    } else if report.ate_food {
                        debug!("Ate food at {}. Speed now {}ms", report.new_head, self.game.speed_ms());
                    }
                }
                None
            }
            SnakeMessage::Start => {
                self.apply(SnakeInput::Start);
                None
            }
            SnakeMessage::Acknowledge => {
                self.apply(SnakeInput::Acknowledge);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use iced::futures::StreamExt;

    use super::*;
    use crate::models::snake::grid::Point;

    fn view_model() -> SnakeViewModel {
        SnakeViewModel::from_game(SnakeGame::with_seed(SnakeParams::default(), 8).unwrap())
    }

    fn key(message: Key) -> Message {
        Message::Snake(SnakeMessage::Key(message))
    }

    #[test]
    fn test_direction_keys() {
        assert_eq!(
            SnakeViewModel::direction_for_key(&Key::Named(Named::ArrowUp)),
            Some(Direction::Up)
        );
        assert_eq!(
            SnakeViewModel::direction_for_key(&Key::Named(Named::ArrowLeft)),
            Some(Direction::Left)
        );
        assert_eq!(
            SnakeViewModel::direction_for_key(&Key::Character("s".into())),
            Some(Direction::Down)
        );
        assert_eq!(
            SnakeViewModel::direction_for_key(&Key::Character("D".into())),
            Some(Direction::Right)
        );
        assert_eq!(
            SnakeViewModel::direction_for_key(&Key::Named(Named::Space)),
            None
        );
    }

    #[test]
    fn test_space_starts_when_idle() {
        let mut vm = view_model();
        let next = vm.update(key(Key::Named(Named::Space)));
        assert!(matches!(next, Some(Message::Snake(SnakeMessage::Start))));
        assert_eq!(vm.get_game().state(), SessionState::Idle);

        assert!(vm.update(next.unwrap()).is_none());
        assert_eq!(vm.get_game().state(), SessionState::Running);
        assert!(vm.get_tick_handle().is_some());

        // already running, space does nothing
        assert!(vm.update(key(Key::Named(Named::Space))).is_none());
    }

    #[test]
    fn test_ticks_drive_the_game_until_acknowledged() {
        let mut vm = view_model();
        vm.update(Message::Snake(SnakeMessage::Start));
        vm.update(key(Key::Named(Named::ArrowUp)));
        assert_eq!(vm.get_game().snake().pending_direction(), Direction::Up);

        let mut ticks = 0;
        while vm.get_game().state() == SessionState::Running {
            let generation = vm.get_tick_handle().unwrap().generation();
            vm.update(Message::Snake(SnakeMessage::Tick(generation)));
            ticks += 1;
            assert!(ticks <= 400, "snake never reached a wall");
        }
        assert_eq!(vm.get_game().state(), SessionState::Over);
        assert!(vm.get_tick_handle().is_none());

        let next = vm.update(key(Key::Named(Named::Enter)));
        assert!(matches!(next, Some(Message::Snake(SnakeMessage::Acknowledge))));
        vm.update(next.unwrap());
        assert_eq!(vm.get_game().state(), SessionState::Idle);
        assert_eq!(vm.get_game().snake().get_head(), Point::new(10, 10));
        assert_eq!(vm.get_game().score(), 0);
    }

    #[test]
    fn test_stale_tick_message_is_ignored() {
        let mut vm = view_model();
        vm.update(Message::Snake(SnakeMessage::Start));
        let generation = vm.get_tick_handle().unwrap().generation();
        let head = vm.get_game().snake().get_head();
        vm.update(Message::Snake(SnakeMessage::Tick(generation + 1)));
        assert_eq!(vm.get_game().snake().get_head(), head);
    }

    #[tokio::test]
    async fn test_tick_stream_stamps_generation() {
        let params = SnakeParams {
            initial_speed_ms: 10,
            speed_floor_ms: 5,
            ..SnakeParams::default()
        };
        let mut game = SnakeGame::with_seed(params, 1).unwrap();
        game.start().unwrap();
        let handle = game.tick_handle().unwrap();

        let mut ticks = Box::pin(SnakeViewModel::make_tick_stream(handle));
        for _ in 0..2 {
            let next = ticks.next().await;
            assert!(matches!(
                next,
                Some(Message::Snake(SnakeMessage::Tick(g))) if g == handle.generation()
            ));
        }
    }
}
