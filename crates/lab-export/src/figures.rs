//! Registro de figuras y exportación multiformato.
//!
//! El flujo de trabajo acumula figuras con nombre a medida que el análisis
//! avanza y al final las vuelca todas a disco en uno o más formatos. El
//! registro no interpreta el contenido: una figura es cualquier cosa que
//! sepa entregar bytes para un formato (`Renderable`).

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::errors::ExportError;

/// Formato de salida de una figura.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FigureFormat {
    Png,
    Pdf,
    Svg,
}

impl FigureFormat {
    /// Extensión de archivo (en minúsculas, sin punto).
    pub fn extension(self) -> &'static str {
        match self {
            FigureFormat::Png => "png",
            FigureFormat::Pdf => "pdf",
            FigureFormat::Svg => "svg",
        }
    }
}

impl std::fmt::Display for FigureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Contenido exportable de una figura.
pub trait Renderable {
    /// Bytes del contenido en el formato pedido, o `None` si la figura no
    /// tiene representación en ese formato.
    fn render(&self, format: FigureFormat) -> Option<Vec<u8>>;
}

/// Figura ya renderizada: bytes por formato. Es la implementación que usa
/// la aplicación cuando el contenido sale de otra herramienta (snapshots,
/// gráficos pre-generados).
#[derive(Debug, Default, Clone)]
pub struct PrerenderedFigure {
    payloads: IndexMap<FigureFormat, Vec<u8>>,
}

impl PrerenderedFigure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(mut self, format: FigureFormat, bytes: Vec<u8>) -> Self {
        self.payloads.insert(format, bytes);
        self
    }
}

impl Renderable for PrerenderedFigure {
    fn render(&self, format: FigureFormat) -> Option<Vec<u8>> {
        self.payloads.get(&format).cloned()
    }
}

/// Acumulador de figuras con nombre, en orden de inserción.
#[derive(Default)]
pub struct FigureRegistry {
    figures: IndexMap<String, Box<dyn Renderable>>,
}

impl FigureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra (o reemplaza) una figura bajo un nombre.
    pub fn insert<R: Renderable + 'static>(&mut self, name: &str, figure: R) {
        self.figures.insert(name.to_string(), Box::new(figure));
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.figures.keys().map(|k| k.as_str())
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &dyn Renderable)> {
        self.figures.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }
}

/// Exporta cada figura del registro en cada formato pedido, como
/// `<dir>/<nombre><suffix>.<ext>`. Falla rápido ante la primera figura
/// que no soporte un formato pedido.
pub fn export_figures<P: AsRef<Path>>(registry: &FigureRegistry,
                                      results_dir: P,
                                      formats: &[FigureFormat],
                                      suffix: &str)
                                      -> Result<Vec<PathBuf>, ExportError> {
    let results_dir = results_dir.as_ref();
    log::info!("escribiendo figuras en '{}'", results_dir.display());
    let mut written = Vec::new();
    for format in formats {
        for (name, figure) in registry.iter() {
            let bytes = figure.render(*format).ok_or_else(|| {
                            ExportError::UnsupportedFormat { name: name.to_string(),
                                                             format: format.to_string() }
                        })?;
            let path = results_dir.join(format!("{name}{suffix}.{}", format.extension()));
            fs::write(&path, bytes).map_err(|source| ExportError::Write { path: path.clone(),
                                                                          source })?;
            log::info!("exportada '{}'", path.display());
            written.push(path);
        }
    }
    Ok(written)
}
