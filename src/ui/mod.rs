pub mod navigation_manager;
pub mod surface;
pub mod viewer;
