/// Asset module - pixel decoding, textures, and the async GPU upload pipeline

pub mod decoder;
pub mod load_handle;
pub mod loader;
pub mod texture;

mod upload;


pub use decoder::*;
pub use load_handle::*;
pub use loader::*;
pub use texture::*;
