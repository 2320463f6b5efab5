//! Statistical utilities for the stance posture pipeline.
//!
//! This crate summarizes per-frame angle observations into the session-level
//! numbers the scorer consumes.
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics (mean, median, population variance, standard deviation)
//!
//! # Examples
//!
//! ```
//! use stance_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.variance, 2.0);
//! ```
//!
//! Empty sequences have no statistics; callers that need a neutral value use
//! the `*_or_zero` helpers:
//!
//! ```
//! use stance_stats::descriptive;
//!
//! assert_eq!(descriptive::mean_or_zero(&[]), 0.0);
//! assert_eq!(descriptive::std_dev_or_zero(&[2.0, 4.0]), 1.0);
//! ```

pub mod descriptive;
