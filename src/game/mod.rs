pub mod progression;
pub mod session;
