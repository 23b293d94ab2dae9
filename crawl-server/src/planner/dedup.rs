//! Duplicate detection for accepted venues.
//!
//! The places service returns the same venue under several searches, and
//! sometimes the same physical bar under two ids (a terrace and the main
//! room, say). Both count as duplicates.

use crate::domain::Venue;
use crate::geo;

/// Whether `candidate` duplicates any venue in `accepted`.
///
/// A duplicate shares an id with an accepted venue, or sits closer than
/// `radius_m` to one.
pub fn is_duplicate(accepted: &[Venue], candidate: &Venue, radius_m: f64) -> bool {
    accepted.iter().any(|v| v.id == candidate.id)
        || accepted
            .iter()
            .any(|v| geo::distance(&v.position, &candidate.position) < radius_m)
}

/// Push `candidate` unless it is a duplicate. Returns whether it was added.
pub fn accept(accepted: &mut Vec<Venue>, candidate: Venue, radius_m: f64) -> bool {
    if is_duplicate(accepted, &candidate, radius_m) {
        return false;
    }
    accepted.push(candidate);
    true
}
