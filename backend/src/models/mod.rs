#[macro_use]
mod macros;

pub mod evaluation;
pub mod field;
pub mod model_choice;
pub mod prediction;

pub use evaluation::*;
pub use field::*;
pub use model_choice::*;
pub use prediction::*;
