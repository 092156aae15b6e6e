//! Terminal speed reader: shows a document one word at a time at a chosen
//! pace, slowing down on punctuation and long words.

pub mod app;
pub mod cli;
pub mod engine;
pub mod input;
pub mod logging;
pub mod reading;
pub mod storage;
pub mod ui;
