// Types for the decorated view model

mod types;

pub use types::*;
