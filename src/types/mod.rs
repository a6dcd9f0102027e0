//! Component value types with a binary encoding under the shared codec.

mod bitvector;
mod fontinfo;
mod lang_config;
mod rect;
mod weights;

pub use bitvector::BitVector;
pub use fontinfo::{FontInfo, FontInfoTable, FontProperties, FontSet, FontSpacingInfo};
pub use lang_config::LangConfig;
pub use rect::{ICoord, Rect};
pub use weights::{Array2D, NetworkWeights, WeightMatrix, MAX_DIM};
