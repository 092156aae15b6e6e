// Reader screen: word display, progress, status and the command deck.
pub mod view;
