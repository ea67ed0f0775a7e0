pub mod prompt_loader;

pub use prompt_loader::{load_prompt, load_prompt_set};
