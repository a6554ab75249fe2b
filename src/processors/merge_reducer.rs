use crate::processors::AccumulatorMap;
use rayon::prelude::*;

/// Folds per-worker accumulator maps into one.
///
/// Accumulator combination is associative and commutative, so the order in
/// which maps arrive never changes the result.
pub struct MergeReducer;

impl MergeReducer {
    pub fn new() -> Self {
        Self
    }

    /// Sequential fold into the largest map
    pub fn reduce(&self, maps: Vec<AccumulatorMap>) -> AccumulatorMap {
        let mut maps = maps;
        let largest = maps
            .iter()
            .enumerate()
            .max_by_key(|(_, map)| map.len())
            .map(|(index, _)| index);

        let mut target = match largest {
            Some(index) => maps.swap_remove(index),
            None => return AccumulatorMap::new(),
        };

        for map in maps {
            self.merge_into(&mut target, map);
        }

        target
    }

    /// Balanced pairwise merge on the current rayon pool
    pub fn reduce_pairwise(&self, maps: Vec<AccumulatorMap>) -> AccumulatorMap {
        maps.into_par_iter()
            .reduce_with(|mut left, right| {
                if left.len() < right.len() {
                    let mut right = right;
                    self.merge_into(&mut right, left);
                    return right;
                }
                self.merge_into(&mut left, right);
                left
            })
            .unwrap_or_default()
    }

    pub fn merge_into(&self, target: &mut AccumulatorMap, source: AccumulatorMap) {
        for (key, acc) in source.drain() {
            target.merge(&key, &acc);
        }
    }
}

impl Default for MergeReducer {
    fn default() -> Self {
        Self::new()
    }
}
