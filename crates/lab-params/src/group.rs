//! Contenedor materializado de un grupo de parámetros.

use indexmap::IndexMap;

use crate::value::ParamValue;

/// Grupo de parámetros materializado: una sección de nivel superior del
/// archivo, con un atributo por clave de segundo nivel. Inmutable tras la
/// construcción (los atributos evaluados se computan una única vez durante
/// la materialización del root).
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGroup {
    name: String,
    attrs: IndexMap<String, ParamValue>,
}

impl ParameterGroup {
    pub(crate) fn new(name: String, attrs: IndexMap<String, ParamValue>) -> Self {
        Self { name, attrs }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mapa interno, para el entorno de evaluación del materializador.
    pub(crate) fn attrs(&self) -> &IndexMap<String, ParamValue> {
        &self.attrs
    }

    /// Acceso estilo atributo por nombre.
    pub fn get(&self, attr: &str) -> Option<&ParamValue> {
        self.attrs.get(attr)
    }

    pub fn contains(&self, attr: &str) -> bool {
        self.attrs.contains_key(attr)
    }

    /// Atributos en el orden del archivo.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}
