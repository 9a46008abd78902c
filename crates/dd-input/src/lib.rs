//! `dd-input` — loads a delivery problem from a JSON document.
//!
//! See [`loader`] for the accepted document shapes.

pub mod error;
pub mod loader;


pub use error::{InputError, InputResult};
pub use loader::{ProblemInput, load_input, load_input_reader, load_input_str};
