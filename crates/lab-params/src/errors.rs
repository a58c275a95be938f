//! Errores del núcleo de parámetros.
//!
//! Todos abortan la carga completa: el llamador nunca recibe un set
//! parcialmente fusionado ni un root parcialmente materializado.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParamsError {
    /// El archivo listado no existe o no se pudo leer.
    #[error("no se pudo leer el archivo de parámetros '{path}': {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// El contenido no es JSON válido.
    #[error("JSON inválido en '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// El documento es JSON válido pero no un mapa de nivel superior.
    #[error("el documento '{path}' no es un mapa JSON de nivel superior")]
    NotAMapping { path: PathBuf },

    /// La secuencia de construcción nombra un grupo que no existe.
    #[error("la secuencia de construcción nombra un grupo inexistente: '{name}'")]
    MissingGroup { name: String },

    /// La lista de evaluaciones nombra un atributo que el grupo no tiene.
    #[error("atributo evaluado desconocido: '{group}.{attr}'")]
    UnknownAttribute { group: String, attr: String },

    /// Un valor con marcador `sy.` no parsea como expresión.
    #[error("expresión simbólica inválida en '{group}.{attr}': {source}")]
    SymbolicParse {
        group: String,
        attr: String,
        #[source]
        source: lab_expr::ParseError,
    },

    /// Un atributo evaluado referencia un grupo que existe en el set
    /// fusionado pero aún no fue materializado (referencia adelantada).
    #[error("referencia adelantada en '{group}.{attr}': '{reference}' todavía no está materializado")]
    UnresolvedReference {
        group: String,
        attr: String,
        reference: String,
    },

    /// Cualquier otra falla al evaluar un atributo, con el grupo y el
    /// atributo ofensores para diagnóstico.
    #[error("fallo al evaluar '{group}.{attr}': {message}")]
    Evaluation {
        group: String,
        attr: String,
        message: String,
    },
}
