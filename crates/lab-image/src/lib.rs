//! lab-image: combinación de snapshots ráster en figuras compuestas.
//!
//! Los notebooks de discusión generan snapshots sueltos (PNG/JPEG) que se
//! pegan en una sola figura, apilados en vertical u horizontal con un
//! padding fijo entre imágenes sobre un lienzo blanco.
pub mod combine;
pub mod errors;
pub mod fetch;

pub use combine::{combine_images, combine_into_file, resize_by, CombineOptions, Orientation};
pub use errors::ImageError;
pub use fetch::fetch_images;
