//! Demostración de extremo a extremo del flujo de parámetros: escribe un
//! par defaults/job en un directorio temporal, carga y materializa, y
//! exporta los valores resueltos como resultados JSON.

use std::fs;

use lab_export::{create_directories, export_results};
use lab_params::{import_parameters, ParameterRoot, ParamValue};

fn run_params_demo() -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = std::env::temp_dir().join(format!("labflow-demo-{}", std::process::id()));
    fs::create_dir_all(&work_dir)?;

    // defaults + job: el job pisa una clave sin borrar a las hermanas.
    fs::write(work_dir.join("defaults.json"),
              r#"{
                  "physical": {"channel_radius": 1.0, "viscosity": 0.001},
                  "solver": {"tolerance": 1e-6,
                             "mesh_factor": "root.physical.channel_radius * 100",
                             "notes": "None"}
              }"#)?;
    fs::write(work_dir.join("job.json"),
              r#"{"physical": {"channel_radius": 2.0}}"#)?;

    println!("cargando parámetros desde {}", work_dir.display());
    let merged = import_parameters(&work_dir, &["defaults", "job"])?;

    let mut evaluations = lab_params::Evaluations::new();
    evaluations.insert("solver".to_string(), vec!["mesh_factor".to_string()]);
    let root = ParameterRoot::materialize(&merged, &evaluations, &["physical"])?;

    let mut resolved = serde_json::Map::new();
    for group in root.groups() {
        println!("[{}]", group.name());
        let mut section = serde_json::Map::new();
        for (attr, value) in group.iter() {
            println!("  {attr} = {value}");
            let json_value = match value {
                ParamValue::Null => serde_json::Value::Null,
                ParamValue::Scalar(v) => v.clone(),
                ParamValue::Symbolic(expr) => serde_json::Value::String(expr.to_string()),
            };
            section.insert(attr.to_string(), json_value);
        }
        resolved.insert(group.name().to_string(), serde_json::Value::Object(section));
    }

    let results_dir = create_directories(&work_dir, "Results")?;
    let written = export_results(&results_dir, "results", "_demo", &resolved)?;
    println!("resultados exportados en {}", written.display());

    fs::remove_dir_all(&work_dir)?;
    Ok(())
}

fn main() {
    println!("== labflow: demo de carga y materialización de parámetros ==");
    if let Err(e) = run_params_demo() {
        eprintln!("la demo falló: {e}");
        std::process::exit(1);
    }
    println!("demo completada");
}
