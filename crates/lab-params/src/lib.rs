//! lab-params: carga y materialización de parámetros de trabajo.
//!
//! Este crate es el núcleo del workspace. Expone dos capas:
//! - `loader`: lee una secuencia ordenada de archivos JSON y los fusiona en
//!   un `MergedParameterSet` (merge profundo a nivel de grupo: un archivo
//!   posterior pisa claves individuales sin borrar las hermanas).
//! - `root`: materializa el set fusionado en un `ParameterRoot` de
//!   `ParameterGroup`s inmutables, parseando valores simbólicos (`"sy."`)
//!   y computando los atributos evaluados contra `self.*` / `root.*`.
//!
//! Toda falla es fatal para el paso de carga: no existe materialización
//! parcial ni política de reintentos.
pub mod errors;
pub mod group;
pub mod loader;
pub mod root;
pub mod value;

pub use errors::ParamsError;
pub use group::ParameterGroup;
pub use loader::{import_parameters, read_json_files, MergedParameterSet};
pub use root::{Evaluations, ParameterRoot};
pub use value::ParamValue;
