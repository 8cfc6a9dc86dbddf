// Veridian: originality risk scoring for submitted text documents
//
// This is the library root. Each module corresponds to a stage of the
// scoring pipeline:
//
//   normalize -> { features -> classifier ; similarity } -> fusion -> report
//
// The model store is loaded once at startup and consulted by the classifier
// and similarity scorer; it is mutated only by explicit training or
// corpus-append operations.

pub mod classifier;
pub mod config;
pub mod detector;
pub mod output;
pub mod scoring;
pub mod similarity;
pub mod status;
pub mod store;
pub mod text;

pub use detector::Detector;
