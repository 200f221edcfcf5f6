//! Request, response and upstream wire types.

pub mod completion;
pub mod sermon;

pub use completion::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChoiceMessage};
pub use sermon::{SermonRequest, SermonResponse};
