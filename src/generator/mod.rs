pub mod random;
pub mod snapshot;
pub mod traits;
pub mod types;

pub use random::{RandomDataGenerator, RandomSource};
pub use snapshot::SnapshotSource;
pub use traits::ListingSource;
pub use types::{Bounds, GeneratorError, GeneratorParams};
