//! A collection of the most used traits, structs and enums

pub use crate::plot::Plot;
pub use crate::proxy::{Args, Program};
pub use crate::traits::Set;
pub use crate::value::Value;
pub use crate::{show_many, Error, Figure, Interactive, Options, Output, Replot, Verbose};
