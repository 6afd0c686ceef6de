pub mod color;
pub mod drawer;
pub mod error;
pub mod font;
pub mod image;
pub mod layout;
pub mod metrics;
pub mod page;
pub mod surface;
pub mod table;
pub mod template;
pub mod text;

#[cfg(test)]
pub(crate) mod testing;
