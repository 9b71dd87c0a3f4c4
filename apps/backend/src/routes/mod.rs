pub mod flashcards;
pub mod study;
