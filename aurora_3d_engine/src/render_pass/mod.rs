/// Render pass module - description builder, compiled pass, registry

pub mod builder;
pub mod render_pass;
pub mod render_pass_registry;

pub use builder::*;
pub use render_pass::*;
pub use render_pass_registry::*;
