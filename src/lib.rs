//! labflow: utilidades de soporte para notebooks de cómputo científico.
//!
//! Este crate raíz es la fachada del workspace:
//! - `lab_params` carga archivos JSON de parámetros en orden, los fusiona a
//!   nivel de grupo y los materializa en contenedores inmutables con
//!   evaluación de expresiones simbólicas.
//! - `lab_expr` es el motor de expresiones (lexer, parser Pratt, evaluador
//!   sobre un entorno explícito).
//! - `lab_export` crea directorios de salida y exporta resultados y figuras.
//! - `lab_image` combina snapshots ráster en figuras compuestas.
//!
//! Puede usarse desde el binario de demostración o desde otros clientes.

pub use lab_export as export;
pub use lab_expr as expr;
pub use lab_image as image;
pub use lab_params as params;

pub use lab_export::{create_directories, export_figures, export_results, FigureRegistry};
pub use lab_params::{import_parameters, ParameterRoot, ParamsError, ParamValue};
