pub mod pointer;

pub use pointer::handle_pointer_input;
