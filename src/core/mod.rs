pub mod curve;
pub mod heading;
pub mod sounds;
pub mod timing;

pub use curve::*;
pub use heading::*;
pub use sounds::*;
pub use timing::*;
