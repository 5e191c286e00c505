//! The [`ViewModel`] trait: the layer between the snake model and the screens.

use crate::app::Message;

/// Implemented by the types that own a model and turn UI messages into
/// model transitions.
pub trait ViewModel {
    /// Applies `message` to the model. A returned message is a follow-up
    /// the caller should route next (for example a key that means "start").
    fn update(&mut self, message: Message) -> Option<Message>;
}
