//! # Orbit path cache
//!
//! Sampling a path costs one Kepler solve per point, while a render loop only
//! needs a new path when the orbit itself changes. [`PathCache`] keeps the
//! sampled paths keyed by the exact element values and resolution, so per-frame
//! code can ask for the path every time and only pay on a change.
use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use crate::{
    constants::DEFAULT_PATH_CACHE_CAPACITY, orbit_path::OrbitPath,
    orbital_elements::OrbitalElements, orbitrack_errors::OrbitrackError, propagator::Propagator,
};

/// Identity of a sampled path: bit patterns of the seven elements plus the point count.
///
/// Two element sets share a key only if every field is bit-identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementsKey {
    bits: [u64; 7],
    num_points: usize,
}

impl ElementsKey {
    pub fn new(elements: &OrbitalElements, num_points: usize) -> Self {
        ElementsKey {
            bits: [
                elements.semi_major_axis().to_bits(),
                elements.eccentricity().to_bits(),
                elements.inclination().to_bits(),
                elements.ascending_node_longitude().to_bits(),
                elements.perihelion_argument().to_bits(),
                elements.mean_anomaly_at_epoch().to_bits(),
                elements.orbital_period().to_bits(),
            ],
            num_points,
        }
    }
}

/// Memoised orbit paths.
///
/// Holds at most `capacity` paths; once full, the oldest entry is evicted, so
/// dragging an element slider cannot grow the cache without bound.
#[derive(Debug)]
pub struct PathCache {
    propagator: Propagator,
    capacity: usize,
    paths: HashMap<ElementsKey, Arc<OrbitPath>>,
    insertion_order: VecDeque<ElementsKey>,
}

impl Default for PathCache {
    fn default() -> Self {
        PathCache::new(Propagator::default())
    }
}

impl PathCache {
    /// Empty cache sampling with `propagator`'s settings, holding up to
    /// [`DEFAULT_PATH_CACHE_CAPACITY`] paths.
    pub fn new(propagator: Propagator) -> Self {
        PathCache::with_capacity(propagator, DEFAULT_PATH_CACHE_CAPACITY)
    }

    /// Empty cache holding up to `capacity` paths (at least one).
    pub fn with_capacity(propagator: Propagator, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        PathCache {
            propagator,
            capacity,
            paths: HashMap::with_capacity(capacity),
            insertion_order: VecDeque::with_capacity(capacity),
        }
    }

    /// Cached path for `elements` at the propagator's resolution, sampled on first request.
    pub fn get_or_sample(
        &mut self,
        elements: &OrbitalElements,
    ) -> Result<Arc<OrbitPath>, OrbitrackError> {
        let num_points = self.propagator.params().path_points;
        self.get_or_sample_with_points(elements, num_points)
    }

    /// Cached path for `elements` with `num_points` segments.
    pub fn get_or_sample_with_points(
        &mut self,
        elements: &OrbitalElements,
        num_points: usize,
    ) -> Result<Arc<OrbitPath>, OrbitrackError> {
        let key = ElementsKey::new(elements, num_points);
        if let Some(path) = self.paths.get(&key) {
            log::debug!("orbit path cache hit ({} points)", path.len());
            return Ok(Arc::clone(path));
        }

        log::debug!("orbit path cache miss, sampling {num_points} segments");
        let path = Arc::new(
            self.propagator
                .sample_path_with_points(elements, num_points)?,
        );

        if self.paths.len() >= self.capacity {
            if let Some(oldest) = self.insertion_order.pop_front() {
                self.paths.remove(&oldest);
                log::debug!("orbit path cache full ({}), evicted oldest path", self.capacity);
            }
        }
        self.paths.insert(key, Arc::clone(&path));
        self.insertion_order.push_back(key);
        Ok(path)
    }

    pub fn contains(&self, elements: &OrbitalElements, num_points: usize) -> bool {
        self.paths
            .contains_key(&ElementsKey::new(elements, num_points))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
        self.insertion_order.clear();
    }
}

#[cfg(test)]
mod path_cache_test {
    use super::*;
    use crate::propagator::PropagationParams;

    fn elements() -> OrbitalElements {
        OrbitalElements::from_degrees(0.9, 0.2, 5.0, 240.0, 270.0, 0.0, 310.0).unwrap()
    }

    #[test]
    fn test_hit_returns_same_path() {
        let mut cache = PathCache::default();
        let first = cache.get_or_sample(&elements()).unwrap();
        let second = cache.get_or_sample(&elements()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(first.len(), 201);
    }

    #[test]
    fn test_edit_triggers_new_sample() {
        let mut cache = PathCache::default();
        let elem = elements();
        let edited = elem.with_eccentricity(0.3).unwrap();

        let a = cache.get_or_sample(&elem).unwrap();
        let b = cache.get_or_sample(&edited).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_ne!(*a, *b);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&edited, 200));
    }

    #[test]
    fn test_resolution_is_part_of_key() {
        let params = PropagationParams::builder().path_points(16).build().unwrap();
        let mut cache = PathCache::new(Propagator::new(params).unwrap());

        let coarse = cache.get_or_sample(&elements()).unwrap();
        let fine = cache.get_or_sample_with_points(&elements(), 64).unwrap();
        assert_eq!(coarse.len(), 17);
        assert_eq!(fine.len(), 65);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut cache = PathCache::default();
        assert_eq!(
            cache.get_or_sample_with_points(&elements(), 0),
            Err(OrbitrackError::InvalidPathResolution(0))
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn test_oldest_path_is_evicted_when_full() {
        let mut cache = PathCache::with_capacity(Propagator::default(), 2);
        let base = elements();
        let edits = [0.1, 0.2, 0.3].map(|e| base.with_eccentricity(e).unwrap());

        for elem in &edits {
            cache.get_or_sample(elem).unwrap();
        }

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&edits[0], 200));
        assert!(cache.contains(&edits[1], 200));
        assert!(cache.contains(&edits[2], 200));

        // A hit does not insert a duplicate entry.
        cache.get_or_sample(&edits[2]).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_slider_drag_stays_bounded() {
        let mut cache = PathCache::default();
        let base = elements();
        for k in 0..(3 * DEFAULT_PATH_CACHE_CAPACITY) {
            let elem = base.with_eccentricity(k as f64 * 1e-3).unwrap();
            cache.get_or_sample_with_points(&elem, 8).unwrap();
        }
        assert_eq!(cache.len(), cache.capacity());
        assert_eq!(PathCache::with_capacity(Propagator::default(), 0).capacity(), 1);
    }
}
