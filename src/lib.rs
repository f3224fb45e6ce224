//! StitchLab Core - Creature Stitching Engine
//!
//! # Ground Rules (Non-Negotiable)
//! 1. SVG Is The Only Output - nothing is rasterized
//! 2. Composition Is Deterministic - same inputs and seed, same bytes
//! 3. The Seed Labels, It Does Not Randomize - ids and caption only
//! 4. Motifs Are Additive - any subset may stack, in fixed order
//! 5. The Transport Is Thin - all interesting logic lives in the composer

pub mod composer;
pub mod features;
pub mod http;
pub mod species;
pub mod svg;

pub use composer::{portmanteau, ComposeError, CompositionResult, CreatureComposer};
pub use features::{classify, FeatureSet};
pub use species::{Dimensions, Quality, SpeciesInput};
pub use svg::{Document, Element, Namespace};
