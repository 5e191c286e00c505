use iced::{
    alignment::{Horizontal, Vertical},
    keyboard::{self, Key},
    widget::{button, column, container, text, Column, Row},
    Border, Color, Element, Length, Subscription,
};

use crate::{
    app::Message,
    models::snake::snake_game::{
        CollisionKind, EndReason, SessionState, SnakeBlock, SnakeError, SnakeParams,
    },
    view::View,
    view_model::ViewModel,
    view_models::snake::snake_view_model::SnakeViewModel,
};

#[derive(Clone, Debug)]
pub enum SnakeMessage {
    Key(Key),
    /// Timer fired; carries the generation of the timer that sent it.
    Tick(u64),
    Start,
    Acknowledge,
}

/// Score line, padded to three digits.
#[must_use]
pub fn format_score(score: usize) -> String {
    format!("Score: {score:03}")
}

fn describe(reason: EndReason) -> &'static str {
    match reason {
        EndReason::Collision(CollisionKind::Wall) => "You hit the wall.",
        EndReason::Collision(CollisionKind::SelfCollision) => "You ran into yourself.",
        EndReason::BoardFull => "You filled the board!",
    }
}

#[derive(Debug)]
pub struct SnakeGameScreen {
    view_model: SnakeViewModel,
}

impl SnakeGameScreen {
    /// # Errors
    ///
    /// Returns a [`SnakeError`] if `params` are invalid.
    pub fn new(params: SnakeParams) -> Result<Self, SnakeError> {
        Ok(Self {
            view_model: SnakeViewModel::new(params)?,
        })
    }

    #[must_use]
    pub fn get_view_model(&self) -> &SnakeViewModel {
        &self.view_model
    }
}

impl View for SnakeGameScreen {
    fn update(&mut self, message: Message) -> Option<Message> {
        self.view_model.update(message)
    }

    fn view(&self) -> Element<Message> {
        let game = self.view_model.get_game();
        let mut grid_view = Column::new();
        let cell_size: u16 = 24;

        let make_container = |color: Color| {
            container(text(" ").color(color)) // Empty text to preserve size
                .width(cell_size)
                .height(cell_size)
                .style(move |_: &_| container::Style {
                    border: Border {
                        color: Color::from_rgba(0.0, 0.0, 0.0, 0.1),
                        width: 1.0,
                        ..Default::default()
                    },
                    background: Some(color.into()),
                    ..container::Style::default()
                })
        };

        for grid_row in game.board() {
            let mut row = Row::new();
            for entry in grid_row {
                let rectangle = match entry {
                    SnakeBlock::Empty => make_container(Color::WHITE),
                    SnakeBlock::Food => make_container(Color::from_rgb(1.0, 0.0, 0.0)),
                    SnakeBlock::Body => make_container(Color::from_rgb(0.0, 0.6, 0.0)),
                    SnakeBlock::Head => make_container(Color::BLACK),
                };
                row = row.push(rectangle);
            }
            grid_view = grid_view.push(row);
        }

        let mut content = column![text(format_score(game.score())).size(24), grid_view]
            .spacing(10)
            .align_x(Horizontal::Center);

        match game.state() {
            SessionState::Idle => {
                content = content.push(text("Press spacebar to start the game"));
                content = content.push(
                    button(text("Start"))
                        .on_press(Message::Snake(SnakeMessage::Start))
                        .width(80)
                        .height(40),
                );
            }
            SessionState::Running => {}
            SessionState::Over => {
                if let Some(over) = game.get_game_over() {
                    content = content.push(text(describe(over.reason)));
                    content =
                        content.push(text(format!("Game Over! Your final score: {}", over.score)));
                }
                content = content.push(
                    button(text("OK"))
                        .on_press(Message::Snake(SnakeMessage::Acknowledge))
                        .width(80)
                        .height(40),
                );
            }
        }

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let keyboard =
            keyboard::on_key_press(|key, _| Some(Message::Snake(SnakeMessage::Key(key))));
        match self.view_model.get_tick_handle() {
            // a new generation swaps the stream, dropping the old timer
            Some(handle) => {
                let timer = Subscription::run_with_id(
                    handle.generation(),
                    SnakeViewModel::make_tick_stream(handle),
                );
                Subscription::batch(vec![keyboard, timer])
            }
            None => keyboard,
        }
    }
}
