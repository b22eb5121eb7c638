mod double_tap;
mod drag;
mod fly;
mod rotate;
mod scale;
mod tap;

pub use double_tap::*;
pub use drag::*;
pub use fly::*;
pub use rotate::*;
pub use scale::*;
pub use tap::*;
