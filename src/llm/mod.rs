pub mod anthropic;
pub mod client;
pub mod huggingface;
pub mod prompts;

pub use anthropic::*;
pub use client::*;
pub use huggingface::*;
pub use prompts::*;
