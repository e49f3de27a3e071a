use rand::{Rng, seq::IndexedRandom};
use tracing::warn;

use crate::solver::solver_params::CycleTimePolicy;

/// The cycle lengths an intersection may be initialized with: divisors of the
/// simulation duration, optionally restricted to a band.
#[derive(Debug, Clone)]
pub struct CycleTimes {
    candidates: Vec<u32>,
}

impl CycleTimes {
    pub fn new(duration: u32, policy: &CycleTimePolicy) -> Self {
        let divisors = divisors(duration);

        let candidates = match *policy {
            CycleTimePolicy::AnyDivisor => divisors,
            CycleTimePolicy::Bounded { min, max } => {
                let bounded = divisors
                    .iter()
                    .copied()
                    .filter(|divisor| (min..=max).contains(divisor))
                    .collect::<Vec<_>>();

                if bounded.is_empty() {
                    warn!(
                        "No divisor of {duration} lies in [{min}, {max}], using all divisors instead"
                    );
                    divisors
                } else {
                    bounded
                }
            }
        };

        CycleTimes { candidates }
    }

    pub fn candidates(&self) -> &[u32] {
        &self.candidates
    }

    /// Uniform pick among the candidates.
    pub fn choose(&self, rng: &mut impl Rng) -> u32 {
        self.candidates.choose(rng).copied().unwrap_or(1)
    }
}

fn divisors(value: u32) -> Vec<u32> {
    let mut small = Vec::new();
    let mut large = Vec::new();

    let mut candidate = 1;
    while candidate * candidate <= value {
        if value % candidate == 0 {
            small.push(candidate);
            if candidate != value / candidate {
                large.push(value / candidate);
            }
        }
        candidate += 1;
    }

    small.extend(large.into_iter().rev());
    small
}
