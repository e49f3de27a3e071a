use crate::{define_index_newtype, problem::intersection::IntersectionIdx};

define_index_newtype!(StreetIdx, Street);

/// A directed street. Traversing it takes `length` seconds.
#[derive(Debug, Clone)]
pub struct Street {
    name: String,
    start: IntersectionIdx,
    end: IntersectionIdx,
    length: u32,
}

impl Street {
    pub fn new(name: String, start: IntersectionIdx, end: IntersectionIdx, length: u32) -> Self {
        Street {
            name,
            start,
            end,
            length,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> IntersectionIdx {
        self.start
    }

    /// The intersection whose traffic light controls the exit of this street.
    pub fn end(&self) -> IntersectionIdx {
        self.end
    }

    pub fn length(&self) -> u32 {
        self.length
    }
}
