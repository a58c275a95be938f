//! Errores de la capa de imágenes.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("no se pudo listar el directorio '{path}': {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no se pudo decodificar la imagen '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("no se pudo guardar la imagen '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// La lista de imágenes a combinar está vacía.
    #[error("no hay imágenes para combinar")]
    EmptyBundle,
}
