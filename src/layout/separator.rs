//! Geometric-expansion separation of trajectory bounding volumes.
//!
//! Every slot is pushed outward along a fixed direction chosen from an
//! [`OffsetTable`] row for the current slot count. Each round that still
//! has an overlapping pair adds the slot's step to its offset and doubles
//! the step, so the spread grows exponentially and the number of rounds is
//! logarithmic in the separation required.

use glam::Vec3;

use super::BoundingVolume;
use crate::error::AtomataError;

/// Default expansion-round cap.
pub const DEFAULT_MAX_ROUNDS: u32 = 48;

/// Per-slot-count table of unit directions.
///
/// Row `n - 1` holds the `n` directions used when `n` slots are placed.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetTable {
    rows: Vec<Vec<Vec3>>,
}

impl OffsetTable {
    /// Build a table from raw rows, normalizing every non-zero direction.
    ///
    /// # Errors
    ///
    /// Returns [`AtomataError::InvalidTrajectory`] if row `i` does not hold
    /// exactly `i + 1` directions, or if a multi-slot row contains a zero
    /// or non-finite direction.
    pub fn new(rows: Vec<Vec<Vec3>>) -> Result<Self, AtomataError> {
        let mut normalized = Vec::with_capacity(rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != i + 1 {
                return Err(AtomataError::InvalidTrajectory(format!(
                    "offset table row {i} has {} directions, expected {}",
                    row.len(),
                    i + 1
                )));
            }
            if i == 0 {
                normalized.push(vec![Vec3::ZERO]);
                continue;
            }
            let mut out = Vec::with_capacity(row.len());
            for dir in row {
                let Some(unit) = dir.try_normalize() else {
                    return Err(AtomataError::InvalidTrajectory(format!(
                        "offset table row {i} has a degenerate direction \
                         {dir}"
                    )));
                };
                out.push(unit);
            }
            normalized.push(out);
        }
        Ok(Self { rows: normalized })
    }

    /// Largest slot count the table can place.
    #[must_use]
    pub fn max_slots(&self) -> usize {
        self.rows.len()
    }

    /// Directions for `count` slots, or `None` if unsupported.
    #[must_use]
    pub fn directions(&self, count: usize) -> Option<&[Vec3]> {
        count
            .checked_sub(1)
            .and_then(|row| self.rows.get(row))
            .map(Vec::as_slice)
    }
}

impl Default for OffsetTable {
    /// Spreads slots across several axes rather than stacking them along
    /// one, keeping the empty space between regions small.
    fn default() -> Self {
        let v = Vec3::new;
        let rows = vec![
            vec![v(0.0, 0.0, 0.0)],
            vec![v(0.0, 1.0, 0.0), v(0.0, -1.0, 0.0)],
            vec![v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0), v(0.0, 0.0, 1.0)],
            vec![
                v(-1.0, 1.0, 0.0),
                v(-1.0, -1.0, 0.0),
                v(1.0, 0.0, -1.0),
                v(1.0, 0.0, 1.0),
            ],
            vec![
                v(-1.0, 1.0, 0.0),
                v(1.0, 1.0, 0.0),
                v(1.0, -1.0, 0.0),
                v(-1.0, -1.0, 0.0),
                v(0.0, 0.0, 1.0),
            ],
        ];
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|d| d.normalize_or_zero())
                    .collect::<Vec<_>>()
            })
            .collect();
        Self { rows }
    }
}

/// Computes non-overlapping world offsets for a set of bounding volumes.
#[derive(Debug, Clone)]
pub struct LayoutSeparator {
    table: OffsetTable,
    max_rounds: u32,
}

impl LayoutSeparator {
    /// Separator over `table`, giving up after `max_rounds` expansions.
    #[must_use]
    pub fn new(table: OffsetTable, max_rounds: u32) -> Self {
        Self { table, max_rounds }
    }

    /// Offset table in use.
    #[must_use]
    pub fn table(&self) -> &OffsetTable {
        &self.table
    }

    /// Compute one translation per volume such that no two translated
    /// volumes intersect.
    ///
    /// A single volume always gets a zero offset. The result is fully
    /// determined by the inputs.
    ///
    /// # Errors
    ///
    /// - [`AtomataError::LayoutCapacityExceeded`] if the table has no row
    ///   for `volumes.len()`.
    /// - [`AtomataError::LayoutNonConvergence`] if volumes still overlap
    ///   after the round cap, or the offsets stop being finite.
    pub fn separate(
        &self,
        volumes: &[BoundingVolume],
    ) -> Result<Vec<Vec3>, AtomataError> {
        match volumes.len() {
            0 => return Ok(Vec::new()),
            1 => return Ok(vec![Vec3::ZERO]),
            _ => {}
        }

        let Some(directions) = self.table.directions(volumes.len()) else {
            return Err(AtomataError::LayoutCapacityExceeded {
                requested: volumes.len(),
                supported: self.table.max_slots(),
            });
        };

        let mut offsets = vec![Vec3::ZERO; volumes.len()];
        let mut steps = directions.to_vec();
        let mut rounds = 0;

        while any_overlap(volumes, &offsets) {
            if rounds == self.max_rounds {
                return Err(AtomataError::LayoutNonConvergence { rounds });
            }
            for (offset, step) in offsets.iter_mut().zip(steps.iter_mut()) {
                *offset += *step;
                *step *= 2.0;
            }
            rounds += 1;

            if !offsets.iter().all(|o| o.is_finite()) {
                return Err(AtomataError::LayoutNonConvergence { rounds });
            }
        }

        log::debug!(
            "separated {} bounding volumes in {rounds} rounds",
            volumes.len()
        );
        Ok(offsets)
    }
}

impl Default for LayoutSeparator {
    fn default() -> Self {
        Self::new(OffsetTable::default(), DEFAULT_MAX_ROUNDS)
    }
}

/// Whether any unordered pair of translated volumes intersects.
fn any_overlap(volumes: &[BoundingVolume], offsets: &[Vec3]) -> bool {
    let placed: Vec<BoundingVolume> = volumes
        .iter()
        .zip(offsets)
        .map(|(v, &o)| v.translated(o))
        .collect();

    placed.iter().enumerate().any(|(j, a)| {
        placed[j + 1..].iter().any(|b| a.intersects(b))
    })
}
