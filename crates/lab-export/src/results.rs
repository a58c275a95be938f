//! Exportación de resultados a JSON.
//!
//! El archivo de salida es `<filename><suffix>.json`, con JSON indentado
//! para lectura humana (los notebooks de análisis los abren a mano).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::errors::ExportError;

/// Serializa `results` y lo escribe en `<dir>/<filename><suffix>.json`.
/// Devuelve la ruta escrita.
pub fn export_results<P, T>(results_dir: P,
                            filename: &str,
                            suffix: &str,
                            results: &T)
                            -> Result<PathBuf, ExportError>
    where P: AsRef<Path>,
          T: Serialize + ?Sized
{
    let path = results_dir.as_ref().join(format!("{filename}{suffix}.json"));
    let json = serde_json::to_string_pretty(results)?;
    log::info!("escribiendo resultados en '{}'", path.display());
    fs::write(&path, json).map_err(|source| ExportError::Write { path: path.clone(),
                                                                 source })?;
    Ok(path)
}

/// Redondeo con factor de escala: `round_to(x, n, sf)` redondea `x * sf`
/// a `n` decimales. Con `n = 0` el resultado es entero.
pub fn round_to(value: f64, decimals: u32, scale_factor: f64) -> f64 {
    let shift = 10f64.powi(decimals as i32);
    (value * scale_factor * shift).round() / shift
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn writes_pretty_json_with_suffix() {
        let tmp = tempfile::tempdir().unwrap();
        let results = json!({"flow": {"rate": 1.5, "regime": "laminar"}});

        let path = export_results(tmp.path(), "results", "_run1", &results).unwrap();
        assert!(path.ends_with("results_run1.json"));

        let text = fs::read_to_string(&path).unwrap();
        let reread: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reread, results);
        assert!(text.contains('\n'), "la salida debe estar indentada");
    }

    #[test]
    fn missing_directory_is_a_write_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("no-existe");
        let err = export_results(&missing, "results", "", &json!({})).unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }

    #[test]
    fn round_to_scales_and_rounds() {
        assert_eq!(round_to(1.23456, 2, 1.0), 1.23);
        assert_eq!(round_to(1.5, 0, 2.0), 3.0);
        assert_eq!(round_to(0.001234, 3, 1000.0), 1.234);
    }
}
