mod bundle;
mod graphics;

pub mod prelude {
    pub use crate::bundle::GraphicsBundle;
    pub use crate::graphics::{Frame, Graphics, GraphicsError};
}
