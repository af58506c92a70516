mod canvas;
mod compose;
mod config;
mod pipeline;
mod projection;
mod render;
mod scan;
mod style;

pub use canvas::*;
pub use compose::*;
pub use config::*;
pub use pipeline::*;
pub use projection::*;
pub use render::*;
pub use scan::*;
pub use style::*;
