//! readlab-core — practice-content generation and progress statistics.
//!
//! This crate holds the two halves of the readlab core: a statistical
//! sentence generator plus length-constrained word sampler feeding quiz
//! content, and a read-only aggregation engine turning persisted quiz
//! attempts into learner progress summaries. Web plumbing (auth, pages,
//! record storage) lives outside this crate.

pub mod chain;
pub mod config;
pub mod corpus;
pub mod error;
pub mod generator;
pub mod ingest;
pub mod model;
pub mod sampler;
pub mod service;
pub mod statistics;
