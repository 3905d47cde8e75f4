//! Core library for the morsel meal log: the meal record model, the
//! flat-file CSV store, and the statistics computed over it.

pub mod models;
pub mod stats;
pub mod store;
