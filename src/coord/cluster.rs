//! Grid-bucketed spatial deduplication
//!
//! Reduces a list of occurrence records to at most one representative per
//! grid cell, so dense observation areas render as a single marker instead
//! of hundreds of overlapping ones.
//!
//! Cell size is given in kilometers and converted to degrees with the
//! 1 degree latitude = 111 km approximation on both axes. Output records
//! are always original records (never interpolated points), emitted in
//! insertion order of first-seen cells, so a fixed input order and cell
//! size reproduce the exact same output.

use crate::constants::geo::KM_PER_DEGREE_LAT;
use crate::coord::Coordinates;
use crate::inat::Observation;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Compute the grid cell key for a point at the given cell size in degrees
///
/// Two points collide into the same cell iff their keys are equal.
pub fn cell_key(point: Coordinates, cell_deg: f64) -> (i64, i64) {
    let x = (point.lng / cell_deg).floor() as i64;
    let y = (point.lat / cell_deg).floor() as i64;
    (x, y)
}

/// Deduplicate observations onto a geographic grid
///
/// # Arguments
/// * `observations` - Records to deduplicate, each carrying a geographic point
/// * `cell_km` - Grid cell size in kilometers; `<= 0` disables clustering
///
/// # Selection policy
/// The first record seen occupies its cell. A later record in the same cell
/// replaces the occupant only if the later record is research grade and the
/// occupant is not; a research-grade occupant is never replaced. Records
/// without a geographic point cannot be keyed and are skipped (the fetcher
/// filters these out before they get here).
pub fn cluster_observations(observations: &[Observation], cell_km: f64) -> Vec<Observation> {
    if cell_km <= 0.0 {
        return observations.to_vec();
    }

    let cell_deg = cell_km / KM_PER_DEGREE_LAT;
    let mut slots: HashMap<(i64, i64), usize> = HashMap::new();
    let mut picked: Vec<Observation> = Vec::new();

    for obs in observations {
        let point = match obs.coordinates() {
            Some(p) => p,
            None => continue,
        };

        match slots.entry(cell_key(point, cell_deg)) {
            Entry::Vacant(vacant) => {
                vacant.insert(picked.len());
                picked.push(obs.clone());
            }
            Entry::Occupied(occupied) => {
                let slot = &mut picked[*occupied.get()];
                if obs.is_research() && !slot.is_research() {
                    *slot = obs.clone();
                }
            }
        }
    }

    picked
}
