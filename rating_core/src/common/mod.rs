pub mod enums;
pub mod rating_exception;
pub mod time;
pub mod utils;
