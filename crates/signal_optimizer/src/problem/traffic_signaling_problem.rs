use fxhash::FxHashMap;

use crate::{
    OptimizerError,
    problem::{
        car::{Car, CarIdx},
        intersection::{Intersection, IntersectionIdx},
        street::{Street, StreetIdx},
    },
    utils::enumerate_idx::EnumerateIdx,
};

/// The static road network and the cars driving through it.
///
/// Read-only once built; solutions refer to it through typed indices.
#[derive(Debug)]
pub struct TrafficSignalingProblem {
    duration: u32,
    bonus: u32,
    streets: Vec<Street>,
    cars: Vec<Car>,
    intersections: Vec<Intersection>,
    street_ids: FxHashMap<String, StreetIdx>,
}

impl TrafficSignalingProblem {
    /// Total simulation time in seconds.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Points awarded for every car reaching its destination in time.
    pub fn bonus(&self) -> u32 {
        self.bonus
    }

    pub fn streets(&self) -> &[Street] {
        &self.streets
    }

    pub fn street(&self, street_id: StreetIdx) -> &Street {
        &self.streets[street_id]
    }

    pub fn street_id(&self, name: &str) -> Option<StreetIdx> {
        self.street_ids.get(name).copied()
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn car(&self, car_id: CarIdx) -> &Car {
        &self.cars[car_id]
    }

    pub fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }

    pub fn intersection(&self, intersection_id: IntersectionIdx) -> &Intersection {
        &self.intersections[intersection_id]
    }

    pub fn intersection_count(&self) -> usize {
        self.intersections.len()
    }

    pub fn intersections_iter(&self) -> impl Iterator<Item = (IntersectionIdx, &Intersection)> {
        self.intersections.iter().enumerate_idx()
    }

    /// Upper bound of the score: every car finishing at time zero.
    pub fn max_score(&self) -> u64 {
        (self.bonus as u64 + self.duration as u64) * self.cars.len() as u64
    }
}

struct StreetDefinition {
    name: String,
    start: usize,
    end: usize,
    length: u32,
}

#[derive(Default)]
pub struct TrafficSignalingProblemBuilder {
    duration: Option<u32>,
    bonus: Option<u32>,
    intersection_count: Option<usize>,
    streets: Vec<StreetDefinition>,
    car_paths: Vec<Vec<String>>,
}

impl TrafficSignalingProblemBuilder {
    pub fn set_duration(&mut self, duration: u32) -> &mut Self {
        self.duration = Some(duration);
        self
    }

    pub fn set_bonus(&mut self, bonus: u32) -> &mut Self {
        self.bonus = Some(bonus);
        self
    }

    pub fn set_intersection_count(&mut self, intersection_count: usize) -> &mut Self {
        self.intersection_count = Some(intersection_count);
        self
    }

    pub fn add_street(
        &mut self,
        name: impl Into<String>,
        start: usize,
        end: usize,
        length: u32,
    ) -> &mut Self {
        self.streets.push(StreetDefinition {
            name: name.into(),
            start,
            end,
            length,
        });
        self
    }

    pub fn add_car<S: Into<String>>(&mut self, path: impl IntoIterator<Item = S>) -> &mut Self {
        self.car_paths
            .push(path.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Result<TrafficSignalingProblem, OptimizerError> {
        let duration = self
            .duration
            .ok_or_else(|| OptimizerError::malformed("missing simulation duration"))?;
        if duration == 0 {
            return Err(OptimizerError::malformed(
                "simulation duration must be positive",
            ));
        }

        let bonus = self.bonus.unwrap_or(0);
        let intersection_count = self
            .intersection_count
            .ok_or_else(|| OptimizerError::malformed("missing number of intersections"))?;

        let mut intersections = vec![Intersection::default(); intersection_count];
        let mut streets = Vec::with_capacity(self.streets.len());
        let mut street_ids = FxHashMap::default();

        for (street_id, definition) in self.streets.into_iter().enumerate_idx() {
            let street_id: StreetIdx = street_id;
            if definition.start >= intersection_count || definition.end >= intersection_count {
                return Err(OptimizerError::malformed(format!(
                    "street {} connects {} -> {} but there are only {} intersections",
                    definition.name, definition.start, definition.end, intersection_count
                )));
            }

            if definition.length == 0 {
                return Err(OptimizerError::malformed(format!(
                    "street {} has a zero length",
                    definition.name
                )));
            }

            if street_ids
                .insert(definition.name.clone(), street_id)
                .is_some()
            {
                return Err(OptimizerError::malformed(format!(
                    "street {} is declared twice",
                    definition.name
                )));
            }

            let end = IntersectionIdx::new(definition.end);
            intersections[end].add_incoming_street(street_id);
            streets.push(Street::new(
                definition.name,
                IntersectionIdx::new(definition.start),
                end,
                definition.length,
            ));
        }

        let mut cars = Vec::with_capacity(self.car_paths.len());
        for (car_id, names) in self.car_paths.into_iter().enumerate_idx() {
            let car_id: CarIdx = car_id;
            if names.is_empty() {
                return Err(OptimizerError::malformed(format!(
                    "car {car_id} has an empty path"
                )));
            }

            let path = names
                .iter()
                .map(|name| {
                    street_ids.get(name).copied().ok_or_else(|| {
                        OptimizerError::malformed(format!(
                            "car {car_id} drives through unknown street {name}"
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            for &street_id in &path {
                intersections[streets[street_id].end()].add_car(car_id);
            }

            cars.push(Car::new(path));
        }

        Ok(TrafficSignalingProblem {
            duration,
            bonus,
            streets,
            cars,
            intersections,
            street_ids,
        })
    }
}
