pub mod letter_board;
pub mod progress_bar;
pub mod restore_prompt;
pub mod summary;
