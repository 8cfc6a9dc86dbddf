// Text analysis primitives — normalization and stylometric features.

pub mod features;
pub mod normalize;
