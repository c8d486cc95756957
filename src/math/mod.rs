pub mod math_helpers;

pub mod curve;
pub mod root_finder;
