// file: src/filter/mod.rs
// description: blocked-word list loading and spam classification

pub mod matcher;
pub mod wordlist;

pub use matcher::SpamFilter;
pub use wordlist::WordList;
