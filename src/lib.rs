//! # Orbitrack
//!
//! Position of a body on a closed Keplerian orbit, at any time, from its
//! classical orbital elements; plus the discretized orbit for display.
//!
//! ## Pipeline
//!
//! ```text
//! OrbitalRecord (strings, degrees)
//!   └─ TryFrom ─▶ OrbitalElements (validated, radians)
//!                   └─ Propagator
//!                        ├─ mean anomaly at time  M = (M₀ + n·t·speed) mod 2π
//!                        ├─ KeplerSolver          M ─▶ E
//!                        ├─ perifocal position    (a(cos E − e), b sin E, 0)
//!                        └─ R_z(Ω)·R_x(i)·R_z(ω) ─▶ Position
//! ```
//!
//! ## Example
//!
//! ```rust
//! use orbitrack::presets::OrbitPreset;
//! use orbitrack::propagator::Propagator;
//!
//! let apollo = OrbitPreset::Apollo.elements().unwrap();
//! let propagator = Propagator::default();
//!
//! // One day of simulated time at 10x speed
//! let position = propagator.position_at_time(&apollo, 86_400.0, 10.0);
//! let path = propagator.sample_path(&apollo).unwrap();
//!
//! assert_eq!(path.len(), 201);
//! assert!(position.norm() > apollo.perihelion_distance() - 1e-12);
//! ```
pub mod constants;
pub mod kepler;
pub mod orbit_path;
pub mod orbital_elements;
pub mod orbital_record;
pub mod orbital_state;
pub mod orbitrack_errors;
pub mod path_cache;
pub mod presets;
pub mod propagator;
pub mod ref_system;
