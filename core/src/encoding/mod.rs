pub mod twos_complement;

pub use twos_complement::{decode_word, encode_word};
