use crate::{
    define_index_newtype,
    problem::{car::CarIdx, street::StreetIdx},
};

define_index_newtype!(IntersectionIdx, Intersection);

#[derive(Debug, Clone, Default)]
pub struct Intersection {
    /// Streets ending here, in declaration order.
    incoming_streets: Vec<StreetIdx>,
    /// Cars with at least one street of their path ending here.
    cars: Vec<CarIdx>,
}

impl Intersection {
    pub fn incoming_streets(&self) -> &[StreetIdx] {
        &self.incoming_streets
    }

    pub fn cars(&self) -> &[CarIdx] {
        &self.cars
    }

    pub(crate) fn add_incoming_street(&mut self, street: StreetIdx) {
        self.incoming_streets.push(street);
    }

    pub(crate) fn add_car(&mut self, car: CarIdx) {
        if self.cars.last() != Some(&car) {
            self.cars.push(car);
        }
    }
}
