use crate::{define_index_newtype, problem::street::StreetIdx};

define_index_newtype!(CarIdx, Car);

/// A car and the fixed sequence of streets it drives through.
///
/// The car starts at the end of `path[0]`, queued at that street's traffic
/// light, and is done once it reaches the end of the last street.
#[derive(Debug, Clone)]
pub struct Car {
    path: Vec<StreetIdx>,
}

impl Car {
    pub fn new(path: Vec<StreetIdx>) -> Self {
        Car { path }
    }

    pub fn path(&self) -> &[StreetIdx] {
        &self.path
    }

    pub fn final_street(&self) -> StreetIdx {
        self.path[self.path.len() - 1]
    }
}
