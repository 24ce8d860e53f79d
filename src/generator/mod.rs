pub mod dictionary;
pub mod scramble;
