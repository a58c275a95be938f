//! lab-export: salida de resultados y figuras a disco.
//!
//! Tres piezas chicas: creación de directorios de salida, volcado de
//! resultados a JSON y un registro de figuras con exportación multiformato.
//! Todo es síncrono y de un solo paso; la aplicación decide qué hacer ante
//! una falla (no hay reintentos).
pub mod errors;
pub mod figures;
pub mod outdir;
pub mod results;

pub use errors::ExportError;
pub use figures::{export_figures, FigureFormat, FigureRegistry, PrerenderedFigure, Renderable};
pub use outdir::{create_dir, create_directories};
pub use results::{export_results, round_to};
