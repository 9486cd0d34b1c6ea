extern crate serde;

use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum Justification {
    Left,
    Center,
    Right
}

impl Justification {
    pub fn as_byte(&self) -> u8 {
        match self {
            Justification::Left => 0,
            Justification::Center => 1,
            Justification::Right => 2
        }
    }
}
