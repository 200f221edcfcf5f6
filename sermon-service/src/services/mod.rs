pub mod prompt;
pub mod providers;

pub use prompt::build_sermon_prompt;
