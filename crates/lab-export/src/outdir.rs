//! Creación de directorios de salida.
//!
//! Devuelve en silencio si el directorio ya existe; cualquier otra falla
//! del sistema de archivos aborta.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ExportError;

/// Crea un directorio (y sus padres) si no existe todavía.
pub fn create_dir<P: AsRef<Path>>(dir: P) -> Result<PathBuf, ExportError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| ExportError::Directory { path: dir.to_path_buf(),
                                                                      source })?;
    Ok(dir.to_path_buf())
}

/// Crea `<base>/<name>` como directorio de resultados y devuelve su ruta.
pub fn create_directories<P: AsRef<Path>>(base: P, name: &str) -> Result<PathBuf, ExportError> {
    let base = create_dir(base)?;
    create_dir(base.join(name))
}
