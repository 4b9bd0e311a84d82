// src/math/sampling.rs

use crate::math::{error::*, types::*};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// Reproduzierbarer Seed für die Punktverteilung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteSeed {
    pub seed: u64,
}

impl SiteSeed {
    pub fn from_seed(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_text<S: AsRef<str>>(text: S) -> Self {
        let mut hasher = DefaultHasher::new();
        text.as_ref().hash(&mut hasher);
        Self::from_seed(hasher.finish())
    }

    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

impl Default for SiteSeed {
    fn default() -> Self {
        Self::from_seed(rand::random::<u64>())
    }
}

/// Gleichverteilte Punkte im Inneren von `bounds`.
///
/// Punkte auf der unteren oder linken Kante würden auf dem Super-Dreieck liegen
/// und werden neu gezogen.
pub fn random_sites(count: usize, bounds: Bounds2D, seed: u64) -> MathResult<Vec<Point>> {
    if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
        return Err(MathError::InvalidConfiguration {
            message: format!("Cannot sample sites in empty region {}", bounds),
        });
    }

    let mut rng = SiteSeed::from_seed(seed).rng();
    let mut sites = Vec::with_capacity(count);
    while sites.len() < count {
        let site = Point::new(
            rng.random_range(bounds.min.x..bounds.max.x),
            rng.random_range(bounds.min.z..bounds.max.z),
        );
        if site.x == bounds.min.x || site.z == bounds.min.z {
            continue;
        }
        sites.push(site);
    }

    debug!("Sampled {} sites in {} (seed {})", count, bounds, seed);
    Ok(sites)
}
