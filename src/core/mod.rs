pub mod decoder;
pub mod directory_index;
pub mod error;
pub mod image_format;
pub mod image_store;
pub mod path_resolver;
