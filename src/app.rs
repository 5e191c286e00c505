use iced::{Element, Subscription};

use crate::{
    models::snake::snake_game::{SnakeError, SnakeParams},
    view::View,
    views::snake::snake_game_screen::{SnakeGameScreen, SnakeMessage},
};

pub struct State {
    screen: SnakeGameScreen,
}

#[derive(Clone, Debug)]
pub enum Message {
    Snake(SnakeMessage),
}

impl State {
    /// # Errors
    ///
    /// Returns a [`SnakeError`] if `params` are invalid.
    pub fn new(params: SnakeParams) -> Result<Self, SnakeError> {
        Ok(Self {
            screen: SnakeGameScreen::new(params)?,
        })
    }

    pub fn update(state: &mut State, message: Message) {
        // follow-ups are finite: a key maps to at most one start/acknowledge
        let mut next = Some(message);
        while let Some(message) = next {
            next = state.screen.update(message);
        }
    }

    #[must_use]
    pub fn view(state: &State) -> Element<Message> {
        state.screen.view()
    }

    #[must_use]
    pub fn subscription(state: &State) -> Subscription<Message> {
        state.screen.subscription()
    }
}

#[cfg(test)]
mod tests {
    use iced::keyboard::{key::Named, Key};

    use super::*;
    use crate::models::snake::snake_game::SessionState;

    #[test]
    fn test_space_key_starts_through_follow_up() {
        let mut state = State::new(SnakeParams::default()).unwrap();
        State::update(
            &mut state,
            Message::Snake(SnakeMessage::Key(Key::Named(Named::Space))),
        );
        let game = state.screen.get_view_model().get_game();
        assert_eq!(game.state(), SessionState::Running);
        assert!(game.tick_handle().is_some());
    }
}
