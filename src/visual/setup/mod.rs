pub mod puzzle;

pub use puzzle::{setup_levels, setup_session};
