use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Inclusive integer range to sample from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Errors raised by the random data generator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneratorError {
    /// More unique items were requested than the pool holds
    #[error("cannot pick {requested} unique {pool} from a pool of {available}")]
    PoolExhausted {
        pool: &'static str,
        requested: usize,
        available: usize,
    },

    #[error("empty range for {field}: min {min} is greater than max {max}")]
    EmptyRange {
        field: &'static str,
        min: String,
        max: String,
    },
}

/// Generation parameters for a map session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorParams {
    /// Number of listings per session
    pub count: usize,
    /// Fixed RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Horizontal pin coordinate (px)
    pub location_x: Bounds<i32>,
    /// Vertical pin coordinate (px)
    pub location_y: Bounds<i32>,
    /// Nightly price
    pub price: Bounds<u32>,
    pub rooms: Bounds<u32>,
    pub guests: Bounds<u32>,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            count: 8,
            seed: None,
            location_x: Bounds::new(300, 900),
            location_y: Bounds::new(100, 500),
            price: Bounds::new(100, 1_000_000),
            rooms: Bounds::new(1, 5),
            guests: Bounds::new(1, 10),
        }
    }
}

impl GeneratorParams {
    /// Reject ranges that cannot be sampled
    pub fn validate(&self) -> Result<(), GeneratorError> {
        check_bounds("location_x", &self.location_x)?;
        check_bounds("location_y", &self.location_y)?;
        check_bounds("price", &self.price)?;
        check_bounds("rooms", &self.rooms)?;
        check_bounds("guests", &self.guests)?;
        Ok(())
    }
}

fn check_bounds<T: PartialOrd + Display>(
    field: &'static str,
    bounds: &Bounds<T>,
) -> Result<(), GeneratorError> {
    if bounds.min > bounds.max {
        return Err(GeneratorError::EmptyRange {
            field,
            min: bounds.min.to_string(),
            max: bounds.max.to_string(),
        });
    }
    Ok(())
}
