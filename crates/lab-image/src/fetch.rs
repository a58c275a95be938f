//! Descubrimiento de snapshots en directorios fuente.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::errors::ImageError;

/// Extensiones ráster reconocidas (en minúsculas).
const RASTER_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Recorre los directorios en orden y devuelve nombre de archivo -> ruta.
/// Un directorio posterior pisa a uno anterior para el mismo nombre (la
/// convención del flujo de trabajo: los snapshots más recientes a lo
/// último).
pub fn fetch_images<P: AsRef<Path>>(dirs: &[P]) -> Result<IndexMap<String, PathBuf>, ImageError> {
    let mut images: IndexMap<String, PathBuf> = IndexMap::new();
    for dir in dirs {
        let dir = dir.as_ref();
        let listing = std::fs::read_dir(dir).map_err(|source| {
                          ImageError::ListDir { path: dir.to_path_buf(),
                                                source }
                      })?;
        for entry in listing {
            let entry = entry.map_err(|source| ImageError::ListDir { path: dir.to_path_buf(),
                                                                     source })?;
            let path = entry.path();
            if !is_raster(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                images.insert(name.to_string(), path.clone());
            }
        }
    }
    log::debug!("descubiertos {} snapshots", images.len());
    Ok(images)
}

fn is_raster(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| RASTER_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
