pub mod ai;
pub mod cli;
pub mod core;
pub mod gemini;
pub mod inbox;
pub mod jobs;
pub mod notes;
pub mod openai;
pub mod sync;
