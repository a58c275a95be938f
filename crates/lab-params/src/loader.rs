//! Carga y fusión ordenada de archivos JSON de parámetros.
//!
//! La convención del flujo de trabajo es `["defaults", "<job>"]`: los
//! valores del trabajo pisan los defaults. El merge es profundo a nivel de
//! grupo (segundo nivel): un archivo posterior puede sobreescribir una
//! clave individual de un grupo sin borrar las claves hermanas que fijó un
//! archivo anterior. Los escalares de nivel superior se pisan enteros.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;

use crate::errors::ParamsError;

/// Entrada de nivel superior del set fusionado.
#[derive(Debug, Clone, PartialEq)]
pub enum TopLevelEntry {
    /// Sección con nombre: clave -> escalar JSON.
    Group(IndexMap<String, Value>),
    /// Escalar suelto de nivel superior (se pisa entero entre archivos).
    Scalar(Value),
}

/// Resultado inmutable de fusionar la secuencia de archivos.
///
/// Conserva el orden de inserción de los grupos: es el orden "natural" que
/// el materializador usa para los grupos no nombrados en la secuencia.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedParameterSet {
    entries: IndexMap<String, TopLevelEntry>,
}

impl MergedParameterSet {
    /// Grupos en orden de inserción.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &IndexMap<String, Value>)> {
        self.entries.iter().filter_map(|(name, entry)| match entry {
            TopLevelEntry::Group(map) => Some((name.as_str(), map)),
            TopLevelEntry::Scalar(_) => None,
        })
    }

    pub fn get_group(&self, name: &str) -> Option<&IndexMap<String, Value>> {
        match self.entries.get(name) {
            Some(TopLevelEntry::Group(map)) => Some(map),
            _ => None,
        }
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.get_group(name).is_some()
    }

    /// Escalar suelto de nivel superior, si existe.
    pub fn get_scalar(&self, key: &str) -> Option<&Value> {
        match self.entries.get(key) {
            Some(TopLevelEntry::Scalar(value)) => Some(value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fusiona un documento ya parseado sobre el acumulado.
    fn merge_document(&mut self, doc: serde_json::Map<String, Value>) {
        for (key, item) in doc {
            match item {
                Value::Object(sub) => {
                    // Si el destino ya tiene este grupo, pisar clave por
                    // clave; si no (o si era un escalar), crearlo.
                    let entry = self.entries
                                    .entry(key)
                                    .or_insert_with(|| TopLevelEntry::Group(IndexMap::new()));
                    if !matches!(entry, TopLevelEntry::Group(_)) {
                        *entry = TopLevelEntry::Group(IndexMap::new());
                    }
                    if let TopLevelEntry::Group(map) = entry {
                        for (sub_key, sub_value) in sub {
                            map.insert(sub_key, sub_value);
                        }
                    }
                }
                other => {
                    // Escalar de nivel superior: reemplazo total.
                    self.entries.insert(key, TopLevelEntry::Scalar(other));
                }
            }
        }
    }
}

/// Lee los archivos `<dir>/<name>.json` en orden y los fusiona.
pub fn import_parameters<P: AsRef<Path>>(dir: P,
                                         names: &[&str])
                                         -> Result<MergedParameterSet, ParamsError> {
    let dir = dir.as_ref();
    let paths: Vec<PathBuf> = names.iter()
                                   .map(|name| dir.join(format!("{name}.json")))
                                   .collect();
    read_json_files(&paths)
}

/// Lee y fusiona una lista ordenada de rutas a documentos JSON.
pub fn read_json_files(paths: &[PathBuf]) -> Result<MergedParameterSet, ParamsError> {
    let mut merged = MergedParameterSet::default();
    for path in paths {
        let text = read_parameters_text(path)?;
        let value: Value = serde_json::from_str(&text).map_err(|source| {
                               ParamsError::Parse { path: path.clone(),
                                                    source }
                           })?;
        let Value::Object(doc) = value else {
            return Err(ParamsError::NotAMapping { path: path.clone() });
        };
        log::debug!("fusionando parámetros de '{}'", path.display());
        merged.merge_document(doc);
    }
    Ok(merged)
}

/// Lee el archivo como UTF-8, con degradado a Latin-1 (codificación
/// heredada de los archivos históricos del flujo de trabajo).
fn read_parameters_text(path: &Path) -> Result<String, ParamsError> {
    let bytes = fs::read(path).map_err(|source| ParamsError::File { path: path.to_path_buf(),
                                                                    source })?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
    })
}
