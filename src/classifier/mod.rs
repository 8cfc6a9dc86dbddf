// Risk classification — a kernel SVM over stylometric features.

pub mod bootstrap;
pub mod svm;

pub use svm::{KernelClassifier, TrainConfig};
