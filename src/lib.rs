// Copyright 2025 the Bezcross Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Crossings of cubic Bézier curves.
//!
//! The bezcross library finds where cubic Bézier curves cross each other,
//! and where a single curve crosses itself. Instead of subdividing the
//! curves, it works algebraically: each curve is turned into an implicit
//! equation `f(x, y) = 0`, the other curve's coordinates are substituted
//! into it, and the real roots of the resulting degree 9 polynomial are
//! isolated with a Sturm sequence. Candidates found from both sides are then
//! paired up, which rejects roots that only lie on the unbounded extension
//! of a curve. Self-intersections are solved in closed form.
//!
//! All comparisons against zero are relative to the magnitudes involved,
//! so scaling every curve by the same factor scales the crossings with it
//! and leaves the parameters unchanged.
//!
//! # Examples
//!
//! Two curves crossing once:
//! ```
//! use bezcross::{intersect, Curve, IntersectOptions};
//!
//! let a = Curve::from_coords(0.0, 0.0, 100.0, 0.0, 0.0, 100.0, 100.0, 100.0);
//! let b = Curve::from_coords(0.0, 100.0, 33.0, 66.0, 66.0, 33.0, 100.0, 0.0);
//! let crossings = intersect(&a, &b, &IntersectOptions::default()).unwrap();
//! assert_eq!(crossings.len(), 1);
//! let x = &crossings[0];
//! assert!(x.first().is_on(&a) && x.second().is_on(&b));
//! assert!((x.point().x - 50.0).abs() < 0.01);
//! ```
//!
//! Every crossing in a closed path, neighboring segments excepted:
//! ```
//! use bezcross::{find_intersections, Adjacency, Curve, IntersectOptions};
//!
//! let path = [
//!     Curve::from_coords(0.0, 1000.0, 1500.0, -300.0, -500.0, -300.0, 750.0, 1000.0),
//!     Curve::from_coords(750.0, 1000.0, 600.0, 1200.0, 100.0, 1200.0, 0.0, 1000.0),
//! ];
//! let options = IntersectOptions::default();
//! let crossings = find_intersections(&path, &options, &Adjacency::ClosedPath);
//! assert!(crossings.is_complete());
//! // The first segment loops over itself once.
//! assert_eq!(crossings.intersections.len(), 1);
//! let found = crossings.intersections.iter().next().unwrap();
//! assert_eq!((found.first, found.second), (0, 0));
//! assert!((found.intersection.point().x - 1250.0 / 3.0).abs() < 1e-6);
//! ```
//!
//! # Features
//!
//! - `parallel`: run the checks of [`find_intersections`] on the rayon
//!   thread pool.
//! - `serde`: `Serialize` and `Deserialize` for the plain value types.
//!
//! Diagnostics go through the [`log`] facade; no logger is installed.
//!
//! [`log`]: https://docs.rs/log

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::excessive_precision,
    clippy::many_single_char_names,
    clippy::unreadable_literal,
    reason = "coefficient formulas and test constants"
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod common;
mod collect;
mod cubicbez;
mod curve;
mod deadline;
mod error;
mod implicit;
mod intersect;
mod intersection;
mod matcher;
mod options;
mod point;
mod poly;
mod poly_dyn;
mod rect;
mod resultant;
mod self_intersect;
mod sturm;

pub use crate::collect::*;
pub use crate::cubicbez::*;
pub use crate::curve::*;
pub use crate::deadline::*;
pub use crate::error::*;
pub use crate::implicit::*;
pub use crate::intersect::*;
pub use crate::intersection::*;
pub use crate::matcher::*;
pub use crate::options::*;
pub use crate::point::*;
pub use crate::poly::*;
pub use crate::poly_dyn::*;
pub use crate::rect::*;
pub use crate::resultant::*;
pub use crate::self_intersect::*;
pub use crate::sturm::*;
