// Copyright 2025 the Bezcross Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! All crossings among a collection of curves.

use core::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    intersect, self_intersection, Curve, IntersectError, IntersectOptions, Intersection,
    PairIntersections,
};

/// Which pairs of curves are tested against each other.
///
/// Pairs are always presented with `i < j`. Closures of the form
/// `Fn(usize, usize) -> bool` are policies too, returning `true` for pairs
/// to skip.
pub trait PairPolicy {
    /// Should the pair `(i, j)` out of `count` curves be skipped?
    fn skip(&self, i: usize, j: usize, count: usize) -> bool;
}

impl<F: Fn(usize, usize) -> bool> PairPolicy for F {
    fn skip(&self, i: usize, j: usize, _count: usize) -> bool {
        self(i, j)
    }
}

/// Standard pair policies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Adjacency {
    /// Every pair is tested.
    #[default]
    AllPairs,
    /// The curves are consecutive segments of a path; neighbors, which
    /// meet at a shared endpoint, are not tested.
    OpenPath,
    /// As [`OpenPath`](Self::OpenPath), and the last segment also joins
    /// the first.
    ClosedPath,
}

impl PairPolicy for Adjacency {
    fn skip(&self, i: usize, j: usize, count: usize) -> bool {
        match self {
            Self::AllPairs => false,
            Self::OpenPath => j == i + 1,
            Self::ClosedPath => j == i + 1 || (i == 0 && j + 1 == count),
        }
    }
}

/// A crossing found among a collection, with the curves' indices.
///
/// For a self-intersection both indices are the same.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexedIntersection<'a> {
    /// Index of the curve the first point is on.
    pub first: usize,
    /// Index of the curve the second point is on.
    pub second: usize,
    /// The crossing itself.
    pub intersection: Intersection<'a>,
}

impl fmt::Display for IndexedIntersection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}/#{} {}", self.first, self.second, self.intersection)
    }
}

/// A set of crossings, without duplicates.
///
/// Two entries are the same crossing when they join the same pair of curve
/// indices and their parameters agree to within the accuracy the set was
/// created with. The order of the pair does not matter.
#[derive(Clone, Debug, Default)]
pub struct IntersectionSet<'a> {
    items: Vec<IndexedIntersection<'a>>,
    accuracy: f64,
}

impl<'a> IntersectionSet<'a> {
    /// An empty set that merges parameters closer than `accuracy`.
    pub fn new(accuracy: f64) -> Self {
        IntersectionSet {
            items: Vec::new(),
            accuracy,
        }
    }

    /// Add `item` unless the set already holds the same crossing.
    ///
    /// Returns whether it was added.
    pub fn insert(&mut self, item: IndexedIntersection<'a>) -> bool {
        if self.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Does the set hold the same crossing as `item`?
    pub fn contains(&self, item: &IndexedIntersection<'_>) -> bool {
        self.items.iter().any(|x| self.same(x, item))
    }

    fn same(&self, x: &IndexedIntersection<'_>, y: &IndexedIntersection<'_>) -> bool {
        let close = |s: f64, t: f64| (s - t).abs() <= self.accuracy;
        let (xa, xb) = (x.intersection.first().t(), x.intersection.second().t());
        let (ya, yb) = (y.intersection.first().t(), y.intersection.second().t());
        (x.first == y.first && x.second == y.second && close(xa, ya) && close(xb, yb))
            || (x.first == y.second && x.second == y.first && close(xa, yb) && close(xb, ya))
    }

    /// Number of crossings.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Is the set empty?
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The crossings, in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, IndexedIntersection<'a>> {
        self.items.iter()
    }

    /// The crossings involving curve `index`.
    pub fn involving(
        &self,
        index: usize,
    ) -> impl Iterator<Item = &IndexedIntersection<'a>> + '_ {
        self.items
            .iter()
            .filter(move |x| x.first == index || x.second == index)
    }

    /// The crossings as a vector, in insertion order.
    pub fn into_vec(self) -> Vec<IndexedIntersection<'a>> {
        self.items
    }
}

impl<'a> IntoIterator for IntersectionSet<'a> {
    type Item = IndexedIntersection<'a>;
    type IntoIter = std::vec::IntoIter<IndexedIntersection<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'s, 'a> IntoIterator for &'s IntersectionSet<'a> {
    type Item = &'s IndexedIntersection<'a>;
    type IntoIter = core::slice::Iter<'s, IndexedIntersection<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A pair (or a single curve, when both indices agree) that could not be
/// resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairFailure {
    /// Index of the first curve.
    pub first: usize,
    /// Index of the second curve.
    pub second: usize,
    /// What went wrong.
    pub error: IntersectError,
}

impl fmt::Display for PairFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}/#{}: {}", self.first, self.second, self.error)
    }
}

/// Everything [`find_intersections`] found.
#[derive(Clone, Debug)]
pub struct Crossings<'a> {
    /// The crossings, self-intersections included.
    pub intersections: IntersectionSet<'a>,
    /// Pairs that could not be resolved. Their crossings are missing from
    /// `intersections`.
    pub failures: Vec<PairFailure>,
}

impl Crossings<'_> {
    /// Were all pairs resolved?
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Clone, Copy, Debug)]
enum Job {
    SelfCheck(usize),
    Pair(usize, usize),
}

type Outcome<'a> = (Job, Result<PairIntersections<'a>, IntersectError>);

/// Find every crossing among `curves`.
///
/// Each curve is checked once for a self-intersection, and each pair
/// `i < j` that `policy` does not skip is intersected. A pair that fails
/// is recorded in [`Crossings::failures`] and the rest carry on. With the
/// `parallel` feature the checks run on the rayon thread pool; the result
/// is the same either way.
pub fn find_intersections<'a, P: PairPolicy + ?Sized>(
    curves: &'a [Curve],
    options: &IntersectOptions,
    policy: &P,
) -> Crossings<'a> {
    let n = curves.len();
    let mut jobs: Vec<Job> = (0..n).map(Job::SelfCheck).collect();
    for i in 0..n {
        jobs.extend(
            (i + 1..n)
                .filter(|&j| !policy.skip(i, j, n))
                .map(|j| Job::Pair(i, j)),
        );
    }
    log::debug!("{} curves, {} checks", n, jobs.len());

    let mut crossings = Crossings {
        intersections: IntersectionSet::new(options.root_accuracy),
        failures: Vec::new(),
    };
    for (job, outcome) in run_jobs(&jobs, curves, options) {
        let (first, second) = match job {
            Job::SelfCheck(i) => (i, i),
            Job::Pair(i, j) => (i, j),
        };
        match outcome {
            Ok(found) => {
                for intersection in found {
                    crossings.intersections.insert(IndexedIntersection {
                        first,
                        second,
                        intersection,
                    });
                }
            }
            Err(error) => {
                let failure = PairFailure {
                    first,
                    second,
                    error,
                };
                log::warn!("unresolved {failure}");
                crossings.failures.push(failure);
            }
        }
    }
    crossings
}

fn run_job<'a>(job: Job, curves: &'a [Curve], options: &IntersectOptions) -> Outcome<'a> {
    let result = match job {
        Job::SelfCheck(i) => {
            self_intersection(&curves[i], options).map(|x| x.into_iter().collect())
        }
        Job::Pair(i, j) => intersect(&curves[i], &curves[j], options),
    };
    (job, result)
}

#[cfg(feature = "parallel")]
fn run_jobs<'a>(
    jobs: &[Job],
    curves: &'a [Curve],
    options: &IntersectOptions,
) -> Vec<Outcome<'a>> {
    jobs.par_iter()
        .map(|&job| run_job(job, curves, options))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_jobs<'a>(
    jobs: &[Job],
    curves: &'a [Curve],
    options: &IntersectOptions,
) -> Vec<Outcome<'a>> {
    jobs.iter()
        .map(|&job| run_job(job, curves, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CurvePoint, Degeneracy};

    // Two mirrored loops, two curves with nine crossings and two waves.
    fn knot() -> Vec<Curve> {
        vec![
            Curve::from_coords(0.0, 1000.0, 1500.0, 0.0, -500.0, 0.0, 1000.0, 1000.0),
            Curve::from_coords(0.0, 0.0, 1500.0, 1000.0, -500.0, 1000.0, 1000.0, 0.0),
            Curve::from_coords(20.0, 1000.0, 333.0, -2000.0, 666.0, 3000.0, 980.0, 0.0),
            Curve::from_coords(0.0, 20.0, 3000.0, 333.0, -2000.0, 666.0, 1000.0, 980.0),
            Curve::from_coords(10.0, 0.0, 333.0, 1500.0, 666.0, -500.0, 990.0, 1000.0),
            Curve::from_coords(10.0, 1000.0, 333.0, -500.0, 666.0, 1500.0, 990.0, 0.0),
        ]
    }

    fn count_between(crossings: &Crossings<'_>, i: usize, j: usize) -> usize {
        crossings
            .intersections
            .iter()
            .filter(|x| x.first == i && x.second == j)
            .count()
    }

    #[test]
    fn policies() {
        assert!(!Adjacency::AllPairs.skip(0, 1, 3));
        assert!(Adjacency::OpenPath.skip(0, 1, 3));
        assert!(!Adjacency::OpenPath.skip(0, 2, 3));
        assert!(Adjacency::ClosedPath.skip(0, 2, 3));
        assert!(Adjacency::ClosedPath.skip(1, 2, 3));
        assert!(!Adjacency::ClosedPath.skip(0, 2, 4));
        let odd_only = |i: usize, j: usize| (i + j) % 2 == 0;
        assert!(odd_only.skip(0, 2, 3));
        assert!(!odd_only.skip(0, 1, 3));
    }

    #[test]
    fn all_pairs() {
        let curves = knot();
        let opts = IntersectOptions::default();
        let crossings = find_intersections(&curves, &opts, &Adjacency::AllPairs);
        assert!(crossings.is_complete(), "{:?}", crossings.failures);
        // 64 pairwise crossings and the two loops.
        assert_eq!(crossings.intersections.len(), 66);
        assert_eq!(count_between(&crossings, 0, 0), 1);
        assert_eq!(count_between(&crossings, 1, 1), 1);
        assert_eq!(count_between(&crossings, 0, 1), 6);
        assert_eq!(count_between(&crossings, 2, 3), 9);
        assert_eq!(crossings.intersections.involving(4).count(), 17);
        for x in &crossings.intersections {
            let (a, b) = (&curves[x.first], &curves[x.second]);
            assert!(x.intersection.first().is_on(a), "{x}");
            assert!(x.intersection.second().is_on(b), "{x}");
        }
    }

    #[test]
    fn path_policies() {
        let curves = knot();
        let opts = IntersectOptions::default();
        let open = find_intersections(&curves, &opts, &Adjacency::OpenPath);
        assert_eq!(open.intersections.len(), 38);
        assert_eq!(count_between(&open, 0, 1), 0);
        let closed = find_intersections(&curves, &opts, &Adjacency::ClosedPath);
        assert_eq!(closed.intersections.len(), 35);
        assert_eq!(count_between(&closed, 0, 5), 0);
        let only_self = find_intersections(&curves, &opts, &|_: usize, _: usize| true);
        assert_eq!(only_self.intersections.len(), 2);
        assert!(only_self
            .intersections
            .iter()
            .all(|x| x.intersection.is_self_intersection()));
    }

    #[test]
    fn failures_are_recorded() {
        let mut curves = knot();
        curves.truncate(2);
        curves.push(Curve::from_coords(5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0));
        let opts = IntersectOptions::default();
        let crossings = find_intersections(&curves, &opts, &Adjacency::AllPairs);
        assert_eq!(
            crossings.failures,
            [
                PairFailure {
                    first: 0,
                    second: 2,
                    error: IntersectError::DegenerateCurve(Degeneracy::Point),
                },
                PairFailure {
                    first: 1,
                    second: 2,
                    error: IntersectError::DegenerateCurve(Degeneracy::Point),
                },
            ]
        );
        // The remaining pair and both loops are still found.
        assert_eq!(crossings.intersections.len(), 8);
        assert_eq!(
            crossings.failures[0].to_string(),
            "#0/#2: degenerate curve: control polygon is a point"
        );
    }

    #[test]
    fn set_merges_duplicates() {
        let curves = knot();
        let (a, b) = (&curves[0], &curves[1]);
        let item = |ta: f64, tb: f64| IndexedIntersection {
            first: 0,
            second: 1,
            intersection: Intersection::new(CurvePoint::new(a, ta), CurvePoint::new(b, tb)),
        };
        let mut set = IntersectionSet::new(1e-9);
        assert!(set.is_empty());
        assert!(set.insert(item(0.25, 0.5)));
        assert!(!set.insert(item(0.25, 0.5)));
        assert!(!set.insert(item(0.25 + 1e-10, 0.5)));
        assert!(set.insert(item(0.25 + 1e-6, 0.5)));
        let swapped = IndexedIntersection {
            first: 1,
            second: 0,
            intersection: item(0.25, 0.5).intersection.swapped(),
        };
        assert!(set.contains(&swapped));
        assert!(!set.insert(swapped));
        assert_eq!(set.len(), 2);
        assert_eq!(set.into_vec().len(), 2);
    }

    #[test]
    fn empty_input() {
        let opts = IntersectOptions::default();
        let crossings = find_intersections(&[], &opts, &Adjacency::AllPairs);
        assert!(crossings.intersections.is_empty());
        assert!(crossings.is_complete());
    }
}
