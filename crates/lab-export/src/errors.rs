//! Errores de la capa de exportación.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// No se pudo crear el directorio de salida.
    #[error("no se pudo crear el directorio '{path}': {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No se pudo escribir un archivo de salida.
    #[error("no se pudo escribir '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Los resultados no se pudieron serializar a JSON.
    #[error("fallo serializando resultados a JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Una figura no pudo producir bytes en el formato pedido.
    #[error("la figura '{name}' no soporta el formato {format}")]
    UnsupportedFormat { name: String, format: String },
}
