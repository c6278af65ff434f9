use crate::generator::traits::ListingSource;
use crate::generator::types::{Bounds, GeneratorError, GeneratorParams};
use crate::models::{Author, Listing, Location, LodgingType, Offer};
use anyhow::Result;
use async_trait::async_trait;
use rand::distributions::uniform::SampleUniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Avatar identifiers, rendered as `img/avatars/userNN.png`
pub const AVATAR_IDS: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

pub const TITLES: [&str; 8] = [
    "Большая уютная квартира",
    "Маленькая неуютная квартира",
    "Огромный прекрасный дворец",
    "Маленький ужасный дворец",
    "Красивый гостевой домик",
    "Некрасивый негостеприимный домик",
    "Уютное бунгало далеко от моря",
    "Неуютное бунгало по колено в воде",
];

/// Types handed out to generated listings. Palaces only come from the form.
pub const GENERATED_TYPES: [LodgingType; 3] =
    [LodgingType::Flat, LodgingType::House, LodgingType::Bungalo];

pub const FEATURES: [&str; 6] = [
    "wifi",
    "dishwasher",
    "parking",
    "washer",
    "elevator",
    "conditioner",
];

pub const TIMES: [&str; 3] = ["12:00", "13:00", "14:00"];

pub fn avatar_path(id: u8) -> String {
    format!("img/avatars/user{:02}.png", id)
}

/// Produces synthetic listings from the fixed value pools
pub struct RandomDataGenerator<R> {
    rng: R,
    params: GeneratorParams,
}

impl RandomDataGenerator<StdRng> {
    /// Create a generator seeded from `params.seed`, or from entropy when unset
    pub fn new(params: GeneratorParams) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(params, rng)
    }
}

impl<R: Rng> RandomDataGenerator<R> {
    pub fn with_rng(params: GeneratorParams, rng: R) -> Self {
        Self { rng, params }
    }

    /// Generate exactly `count` listings.
    ///
    /// Avatars and titles are drawn without replacement, so `count` may not
    /// exceed either pool; that is reported as [`GeneratorError::PoolExhausted`]
    /// before any sampling happens.
    pub fn generate(&mut self, count: usize) -> Result<Vec<Listing>, GeneratorError> {
        self.params.validate()?;

        let avatars = pick_unique(&mut self.rng, &AVATAR_IDS, count, "avatars")?;
        let titles = pick_unique(&mut self.rng, &TITLES, count, "titles")?;

        let listings = avatars
            .into_iter()
            .zip(titles)
            .map(|(avatar, title)| self.create_listing(avatar, title))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Generated {} listings", listings.len());
        Ok(listings)
    }

    fn create_listing(&mut self, avatar: u8, title: &str) -> Result<Listing, GeneratorError> {
        let location = Location {
            x: sample(&mut self.rng, self.params.location_x),
            y: sample(&mut self.rng, self.params.location_y),
        };

        let features = pick_features(&mut self.rng, &FEATURES)?;

        Ok(Listing {
            author: Author {
                avatar: avatar_path(avatar),
            },
            location,
            offer: Offer {
                title: title.to_string(),
                address: location.address(),
                price: sample(&mut self.rng, self.params.price),
                kind: pick_one(&mut self.rng, &GENERATED_TYPES),
                rooms: sample(&mut self.rng, self.params.rooms),
                guests: sample(&mut self.rng, self.params.guests),
                checkin: pick_one(&mut self.rng, &TIMES).to_string(),
                checkout: pick_one(&mut self.rng, &TIMES).to_string(),
                features,
                description: String::new(),
                photos: Vec::new(),
            },
        })
    }
}

/// Uniform sample over an inclusive range
fn sample<T, R>(rng: &mut R, bounds: Bounds<T>) -> T
where
    T: SampleUniform + PartialOrd + Copy,
    R: Rng,
{
    rng.gen_range(bounds.min..=bounds.max)
}

/// Uniform pick with replacement. `pool` must not be empty.
fn pick_one<T: Copy, R: Rng>(rng: &mut R, pool: &[T]) -> T {
    pool[rng.gen_range(0..pool.len())]
}

/// Pick `count` distinct items by sampling with replacement and discarding
/// repeats.
fn pick_unique<T, R>(
    rng: &mut R,
    pool: &[T],
    count: usize,
    name: &'static str,
) -> Result<Vec<T>, GeneratorError>
where
    T: Copy + PartialEq,
    R: Rng,
{
    if count > pool.len() {
        return Err(GeneratorError::PoolExhausted {
            pool: name,
            requested: count,
            available: pool.len(),
        });
    }

    let mut picked = Vec::with_capacity(count);
    while picked.len() < count {
        let item = pick_one(rng, pool);
        if !picked.contains(&item) {
            picked.push(item);
        }
    }
    Ok(picked)
}

/// Pick a non-empty subset of `pool` that leaves at least one item out
fn pick_features<R: Rng>(
    rng: &mut R,
    pool: &[&'static str],
) -> Result<Vec<String>, GeneratorError> {
    if pool.len() < 2 {
        return Err(GeneratorError::PoolExhausted {
            pool: "features",
            requested: 2,
            available: pool.len(),
        });
    }

    let count = rng.gen_range(1..pool.len());
    Ok(pick_unique(rng, pool, count, "features")?
        .into_iter()
        .map(str::to_string)
        .collect())
}

/// Listing source backed by [`RandomDataGenerator`]
pub struct RandomSource {
    params: GeneratorParams,
}

impl RandomSource {
    pub fn new(params: GeneratorParams) -> Self {
        Self { params }
    }
}

#[async_trait]
impl ListingSource for RandomSource {
    async fn load(&self) -> Result<Vec<Listing>> {
        info!(
            "Generating {} random listings (seed: {:?})",
            self.params.count, self.params.seed
        );
        let mut generator = RandomDataGenerator::new(self.params.clone());
        Ok(generator.generate(self.params.count)?)
    }

    fn source_name(&self) -> &'static str {
        "random"
    }
}
