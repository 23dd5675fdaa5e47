//! # Módulo Inference — Passada Mamdani
//!
//! Motor de inferência sem estado ([`MamdaniEngine`]) e defuzzificação por
//! centroide ([`defuzz::centroid`]). A fachada com estado por consulta é a
//! [`Session`](crate::session::Session).

/// Sub-módulo com a passada de inferência Mamdani.
pub mod engine;

/// Sub-módulo com a defuzzificação por centroide discreto.
pub mod defuzz;

pub use engine::MamdaniEngine;
