//! Prueba de integración de la fachada: parámetros -> resultados -> figuras,
//! como lo encadena un notebook real.

use std::fs;

use labflow_rust::export::{FigureFormat, PrerenderedFigure};
use labflow_rust::{create_directories, export_figures, export_results, import_parameters,
                   FigureRegistry, ParameterRoot};
use serde_json::json;

#[test]
fn load_materialize_and_export() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("defaults.json"),
              r#"{"physical": {"channel_radius": 2, "label": "None"},
                  "solver": {"steps": "root.physical.channel_radius * 50"}}"#).unwrap();
    fs::write(tmp.path().join("job.json"),
              r#"{"physical": {"channel_radius": 3}}"#).unwrap();

    let merged = import_parameters(tmp.path(), &["defaults", "job"]).unwrap();
    let mut evaluations = labflow_rust::params::Evaluations::new();
    evaluations.insert("solver".into(), vec!["steps".into()]);
    let root = ParameterRoot::materialize(&merged, &evaluations, &["physical"]).unwrap();

    let physical = root.get("physical").unwrap();
    assert_eq!(physical.get("channel_radius").unwrap().as_f64(), Some(3.0));
    assert!(physical.get("label").unwrap().is_null());
    assert_eq!(root.get("solver").unwrap().get("steps").unwrap().as_f64(), Some(150.0));

    // Exportar resultados y una figura pre-renderizada al directorio de
    // salida, como hace el cierre de un notebook.
    let results_dir = create_directories(tmp.path().join("Results"), "Demo").unwrap();
    let results = json!({"solver": {"steps": 150.0}});
    let results_path = export_results(&results_dir, "results", "", &results).unwrap();
    assert!(results_path.is_file());

    let mut registry = FigureRegistry::new();
    registry.insert("profile",
                    PrerenderedFigure::new().with_payload(FigureFormat::Png, vec![1, 2, 3]));
    let written = export_figures(&registry, &results_dir, &[FigureFormat::Png], "_v1").unwrap();
    assert_eq!(written.len(), 1);
    assert!(results_dir.join("profile_v1.png").is_file());
}
