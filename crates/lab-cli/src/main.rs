use lab_params::{import_parameters, ParameterRoot};

fn main() {
    // CLI mínima: `lab-cli params --dir <DIR> --files <a,b,...> [--seq <g1,g2>] [--eval <grupo.attr,...>]`
    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 2 && args[1] == "params" {
        let mut dir: Option<String> = None;
        let mut files: Vec<String> = Vec::new();
        let mut seq: Vec<String> = Vec::new();
        let mut evaluations: lab_params::Evaluations = lab_params::Evaluations::new();
        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "--dir" => {
                    i += 1;
                    if i < args.len() { dir = Some(args[i].clone()); }
                }
                "--files" => {
                    i += 1;
                    if i < args.len() {
                        files = args[i].split(',').map(str::to_string).collect();
                    }
                }
                "--seq" => {
                    i += 1;
                    if i < args.len() {
                        seq = args[i].split(',').map(str::to_string).collect();
                    }
                }
                "--eval" => {
                    i += 1;
                    if i < args.len() {
                        // Cada entrada es `grupo.attr`.
                        for entry in args[i].split(',') {
                            if let Some((group, attr)) = entry.split_once('.') {
                                evaluations.entry(group.to_string())
                                           .or_default()
                                           .push(attr.to_string());
                            } else {
                                eprintln!("[lab-cli] entrada --eval inválida: '{entry}' (se espera grupo.attr)");
                                std::process::exit(4);
                            }
                        }
                    }
                }
                _ => {}
            }
            i += 1;
        }

        let (Some(dir), false) = (dir, files.is_empty()) else {
            eprintln!("[lab-cli] params requiere --dir y --files");
            std::process::exit(4);
        };

        let merged = match import_parameters(&dir, &files.iter().map(String::as_str).collect::<Vec<_>>()) {
            Ok(m) => m,
            Err(e) => { eprintln!("[lab-cli] error de carga: {e}"); std::process::exit(4); }
        };
        let seq_refs: Vec<&str> = seq.iter().map(String::as_str).collect();
        let root = match ParameterRoot::materialize(&merged, &evaluations, &seq_refs) {
            Ok(r) => r,
            Err(e) => { eprintln!("[lab-cli] error de materialización: {e}"); std::process::exit(5); }
        };

        for group in root.groups() {
            println!("[{}]", group.name());
            for (attr, value) in group.iter() {
                println!("  {attr} = {value}");
            }
        }
        std::process::exit(0);
    }

    eprintln!("uso: lab-cli params --dir <DIR> --files <a,b,...> [--seq <g1,g2>] [--eval <grupo.attr,...>]");
    std::process::exit(2);
}
