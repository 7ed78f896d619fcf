//! Answer parsing: raw model responses (and gold labels) to structured answers.

pub mod choice;
pub mod entity;

pub use choice::{parse_choice, Choice};
pub use entity::{parse_entity_list, parse_string_list, EntitySet};
