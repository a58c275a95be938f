//! Materialización del set fusionado en grupos inmutables.
//!
//! El llamador controla la secuencia de construcción: los grupos nombrados
//! se materializan primero, en el orden dado, y el resto sigue en el orden
//! de inserción del set. Así los atributos evaluados de un grupo posterior
//! pueden referenciar con `root.<grupo>.*` a los ya materializados. Una
//! referencia a un grupo todavía no construido no es un error crudo del
//! evaluador sino `ParamsError::UnresolvedReference`.

use std::cell::RefCell;
use std::collections::HashMap;

use indexmap::IndexMap;
use lab_expr::{evaluate, EvalError, Expr, Scope};
use serde_json::Value;

use crate::errors::ParamsError;
use crate::group::ParameterGroup;
use crate::loader::MergedParameterSet;
use crate::value::ParamValue;

/// Atributos a evaluar por grupo: nombre de grupo -> nombres de atributos
/// cuyo valor textual/simbólico es una fórmula a computar.
pub type Evaluations = HashMap<String, Vec<String>>;

/// Raíz de parámetros materializada: un `ParameterGroup` por sección.
/// Instantánea de sólo lectura; no hay estados posteriores a la
/// construcción.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRoot {
    groups: IndexMap<String, ParameterGroup>,
}

impl ParameterRoot {
    /// Construye la raíz a partir del set fusionado.
    ///
    /// `sequence` fija qué grupos van primero (cada nombre debe existir);
    /// el resto se materializa en el orden de inserción del set. Falla
    /// rápido: ningún error deja una raíz parcialmente construida.
    pub fn materialize(merged: &MergedParameterSet,
                       evaluations: &Evaluations,
                       sequence: &[&str])
                       -> Result<Self, ParamsError> {
        let mut order: Vec<String> = Vec::new();
        for name in sequence {
            if !merged.has_group(name) {
                return Err(ParamsError::MissingGroup { name: (*name).to_string() });
            }
            if !order.iter().any(|n| n == name) {
                order.push((*name).to_string());
            }
        }
        for (name, _) in merged.groups() {
            if !order.iter().any(|n| n == name) {
                order.push(name.to_string());
            }
        }

        let all_groups: Vec<String> = merged.groups().map(|(n, _)| n.to_string()).collect();

        let mut groups: IndexMap<String, ParameterGroup> = IndexMap::new();
        for name in &order {
            let raw = merged.get_group(name)
                            .ok_or_else(|| ParamsError::MissingGroup { name: name.clone() })?;
            log::debug!("materializando grupo '{name}'");
            let attrs = materialize_group(name,
                                          raw,
                                          evaluations.get(name.as_str()),
                                          &groups,
                                          &all_groups)?;
            groups.insert(name.clone(), ParameterGroup::new(name.clone(), attrs));
        }
        Ok(Self { groups })
    }

    pub fn get(&self, name: &str) -> Option<&ParameterGroup> {
        self.groups.get(name)
    }

    /// Grupos en orden de materialización.
    pub fn groups(&self) -> impl Iterator<Item = &ParameterGroup> {
        self.groups.values()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Materializa un grupo: primero todos los atributos crudos, después los
/// evaluados en el orden de la lista (un evaluado posterior ve el resultado
/// de los anteriores).
fn materialize_group(group_name: &str,
                     raw: &IndexMap<String, Value>,
                     eval_list: Option<&Vec<String>>,
                     built: &IndexMap<String, ParameterGroup>,
                     all_groups: &[String])
                     -> Result<IndexMap<String, ParamValue>, ParamsError> {
    let mut attrs: IndexMap<String, ParamValue> = IndexMap::new();
    for (key, value) in raw {
        let parsed = ParamValue::from_raw(value).map_err(|source| {
                         ParamsError::SymbolicParse { group: group_name.to_string(),
                                                      attr: key.clone(),
                                                      source }
                     })?;
        attrs.insert(key.clone(), parsed);
    }

    let Some(eval_list) = eval_list else {
        return Ok(attrs);
    };

    for attr in eval_list {
        let current = attrs.get(attr).ok_or_else(|| {
                          ParamsError::UnknownAttribute { group: group_name.to_string(),
                                                          attr: attr.clone() }
                      })?;

        // El valor actual del atributo es la fórmula.
        let formula: Expr = match current {
            ParamValue::Symbolic(expr) => expr.clone(),
            ParamValue::Scalar(Value::String(text)) => {
                lab_expr::parse_expr(text).map_err(|source| {
                    ParamsError::SymbolicParse { group: group_name.to_string(),
                                                 attr: attr.clone(),
                                                 source }
                })?
            }
            // Un número ya está resuelto; evaluarlo sería la identidad.
            ParamValue::Scalar(Value::Number(_)) => continue,
            other => {
                return Err(ParamsError::Evaluation {
                    group: group_name.to_string(),
                    attr: attr.clone(),
                    message: format!("el valor '{other}' no es una fórmula evaluable"),
                })
            }
        };

        let visiting = RefCell::new(vec![format!("{group_name}.{attr}")]);
        let scope = EvalScope { group_name,
                                attrs: &attrs,
                                built,
                                visiting: &visiting };
        let result = evaluate(&formula, &scope).map_err(|err| {
                         classify_eval_error(err, group_name, attr, built, all_groups)
                     })?;

        let number = serde_json::Number::from_f64(result).ok_or_else(|| {
                         ParamsError::Evaluation { group: group_name.to_string(),
                                                   attr: attr.clone(),
                                                   message: format!("resultado no finito: {result}") }
                     })?;
        attrs.insert(attr.clone(), ParamValue::Scalar(Value::Number(number)));
    }

    Ok(attrs)
}

/// Un `root.<grupo>.*` hacia un grupo que existe en el set pero todavía no
/// fue materializado es una referencia adelantada; cualquier otra falla del
/// evaluador se envuelve con el grupo/atributo ofensor.
fn classify_eval_error(err: EvalError,
                       group: &str,
                       attr: &str,
                       built: &IndexMap<String, ParameterGroup>,
                       all_groups: &[String])
                       -> ParamsError {
    if let EvalError::UndefinedVariable { ref name } = err {
        let segments: Vec<&str> = name.split('.').collect();
        if segments.len() == 3 && segments[0] == "root" {
            let target = segments[1];
            if all_groups.iter().any(|g| g == target) && !built.contains_key(target) {
                return ParamsError::UnresolvedReference { group: group.to_string(),
                                                          attr: attr.to_string(),
                                                          reference: name.clone() };
            }
        }
    }
    ParamsError::Evaluation { group: group.to_string(),
                              attr: attr.to_string(),
                              message: err.to_string() }
}

/// Entorno de evaluación de un grupo en construcción: `self.*` (y nombres
/// sueltos) resuelven contra el propio grupo, `root.<g>.*` contra los ya
/// materializados. Los atributos simbólicos se evalúan de forma anidada
/// con detección de ciclos.
struct EvalScope<'a> {
    group_name: &'a str,
    attrs: &'a IndexMap<String, ParamValue>,
    built: &'a IndexMap<String, ParameterGroup>,
    visiting: &'a RefCell<Vec<String>>,
}

impl EvalScope<'_> {
    fn local(&self, attr: &str, display: &str) -> Result<f64, EvalError> {
        let value = self.attrs
                        .get(attr)
                        .ok_or_else(|| EvalError::UndefinedVariable { name: display.to_string() })?;
        self.numeric(self.group_name, self.attrs, attr, value, display)
    }

    fn remote(&self, group: &str, attr: &str, display: &str) -> Result<f64, EvalError> {
        let target = self.built
                         .get(group)
                         .ok_or_else(|| EvalError::UndefinedVariable { name: display.to_string() })?;
        let value = target.get(attr)
                          .ok_or_else(|| EvalError::UndefinedVariable { name: display.to_string() })?;
        self.numeric(group, target.attrs(), attr, value, display)
    }

    fn numeric(&self,
               owner: &str,
               owner_attrs: &IndexMap<String, ParamValue>,
               attr: &str,
               value: &ParamValue,
               display: &str)
               -> Result<f64, EvalError> {
        match value {
            ParamValue::Scalar(Value::Number(n)) => {
                n.as_f64()
                 .ok_or_else(|| EvalError::NotNumeric { name: display.to_string() })
            }
            ParamValue::Symbolic(expr) => {
                let key = format!("{owner}.{attr}");
                if self.visiting.borrow().iter().any(|v| v == &key) {
                    return Err(EvalError::Circular { name: key });
                }
                self.visiting.borrow_mut().push(key);
                let nested = EvalScope { group_name: owner,
                                         attrs: owner_attrs,
                                         built: self.built,
                                         visiting: self.visiting };
                let result = evaluate(expr, &nested);
                self.visiting.borrow_mut().pop();
                result
            }
            _ => Err(EvalError::NotNumeric { name: display.to_string() }),
        }
    }
}

impl Scope for EvalScope<'_> {
    fn resolve(&self, path: &[String]) -> Result<f64, EvalError> {
        let display = path.join(".");
        match path {
            [single] => self.local(single, &display),
            [keyword, attr] if keyword.as_str() == "self" => self.local(attr, &display),
            [keyword, group, attr] if keyword.as_str() == "root" => {
                self.remote(group, attr, &display)
            }
            _ => Err(EvalError::UndefinedVariable { name: display }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::read_json_files;
    use serde_json::json;
    use std::path::PathBuf;

    fn merged_from(docs: &[&str]) -> MergedParameterSet {
        let tmp = tempfile::tempdir().unwrap();
        let mut paths: Vec<PathBuf> = Vec::new();
        for (i, doc) in docs.iter().enumerate() {
            let path = tmp.path().join(format!("f{i}.json"));
            std::fs::write(&path, doc).unwrap();
            paths.push(path);
        }
        read_json_files(&paths).unwrap()
    }

    fn evals(pairs: &[(&str, &[&str])]) -> Evaluations {
        pairs.iter()
             .map(|(g, attrs)| (g.to_string(), attrs.iter().map(|a| a.to_string()).collect()))
             .collect()
    }

    #[test]
    fn evaluated_attribute_uses_self_reference() {
        let merged = merged_from(&[r#"{"physical": {"channel_radius": 2,
                                                    "channel_radius_3x": "self.channel_radius*3"}}"#]);
        let root = ParameterRoot::materialize(&merged,
                                              &evals(&[("physical", &["channel_radius_3x"])]),
                                              &[]).unwrap();
        let group = root.get("physical").unwrap();
        assert_eq!(group.get("channel_radius_3x").unwrap().as_f64(), Some(6.0));
    }

    #[test]
    fn later_evaluated_attribute_sees_earlier_result() {
        let merged = merged_from(&[r#"{"g": {"base": 2,
                                             "double": "self.base*2",
                                             "quad": "self.double*2"}}"#]);
        let root = ParameterRoot::materialize(&merged,
                                              &evals(&[("g", &["double", "quad"])]),
                                              &[]).unwrap();
        let group = root.get("g").unwrap();
        assert_eq!(group.get("quad").unwrap().as_f64(), Some(8.0));
    }

    #[test]
    fn symbolic_attribute_resolves_transitively() {
        // `area` referencia `r2`, que a su vez es simbólico: la resolución
        // anidada debe llegar hasta el escalar.
        let merged = merged_from(&[r#"{"g": {"r": 3,
                                             "r2": "sy.self.r * self.r",
                                             "area": "pi * self.r2"}}"#]);
        let root = ParameterRoot::materialize(&merged, &evals(&[("g", &["area"])]), &[]).unwrap();
        let area = root.get("g").unwrap().get("area").unwrap().as_f64().unwrap();
        assert!((area - std::f64::consts::PI * 9.0).abs() < 1e-9);
    }

    #[test]
    fn circular_symbolic_reference_is_reported() {
        let merged = merged_from(&[r#"{"g": {"a": "sy.self.b", "b": "sy.self.a"}}"#]);
        let err = ParameterRoot::materialize(&merged, &evals(&[("g", &["a"])]), &[]).unwrap_err();
        match err {
            ParamsError::Evaluation { group, attr, message } => {
                assert_eq!((group.as_str(), attr.as_str()), ("g", "a"));
                assert!(message.contains("circular"), "mensaje: {message}");
            }
            other => panic!("error inesperado: {other:?}"),
        }
    }

    #[test]
    fn forward_reference_is_a_distinct_error() {
        let merged = merged_from(&[r#"{"a": {"x": "root.b.y + 1"},
                                       "b": {"y": 2}}"#]);
        // Sin secuencia, `a` se construye antes que `b`.
        let err = ParameterRoot::materialize(&merged, &evals(&[("a", &["x"])]), &[]).unwrap_err();
        match err {
            ParamsError::UnresolvedReference { group, attr, reference } => {
                assert_eq!((group.as_str(), attr.as_str()), ("a", "x"));
                assert_eq!(reference, "root.b.y");
            }
            other => panic!("error inesperado: {other:?}"),
        }
    }

    #[test]
    fn sequence_resolves_the_forward_reference() {
        let merged = merged_from(&[r#"{"a": {"x": "root.b.y + 1"},
                                       "b": {"y": 2}}"#]);
        let root = ParameterRoot::materialize(&merged, &evals(&[("a", &["x"])]), &["b"]).unwrap();
        assert_eq!(root.get("a").unwrap().get("x").unwrap().as_f64(), Some(3.0));
    }

    #[test]
    fn reference_to_unknown_group_is_plain_evaluation_error() {
        // `root.nope` no existe en el set: es un error común de evaluación,
        // no una referencia adelantada.
        let merged = merged_from(&[r#"{"a": {"x": "root.nope.y"}}"#]);
        let err = ParameterRoot::materialize(&merged, &evals(&[("a", &["x"])]), &[]).unwrap_err();
        assert!(matches!(err, ParamsError::Evaluation { .. }));
    }

    #[test]
    fn missing_sequence_group_fails() {
        let merged = merged_from(&[r#"{"a": {"x": 1}}"#]);
        let err = ParameterRoot::materialize(&merged, &Evaluations::new(), &["zz"]).unwrap_err();
        assert!(matches!(err, ParamsError::MissingGroup { .. }));
    }

    #[test]
    fn unknown_evaluated_attribute_fails() {
        let merged = merged_from(&[r#"{"a": {"x": 1}}"#]);
        let err = ParameterRoot::materialize(&merged, &evals(&[("a", &["zz"])]), &[]).unwrap_err();
        assert!(matches!(err, ParamsError::UnknownAttribute { .. }));
    }

    #[test]
    fn numeric_evaluated_attribute_is_left_untouched() {
        let merged = merged_from(&[r#"{"a": {"x": 5}}"#]);
        let root = ParameterRoot::materialize(&merged, &evals(&[("a", &["x"])]), &[]).unwrap();
        assert_eq!(root.get("a").unwrap().get("x").unwrap().as_f64(), Some(5.0));
    }

    #[test]
    fn null_and_plain_values_materialize_as_expected() {
        let merged = merged_from(&[r#"{"a": {"gone": "None", "label": "job-7", "flag": true}}"#]);
        let root = ParameterRoot::materialize(&merged, &Evaluations::new(), &[]).unwrap();
        let group = root.get("a").unwrap();
        assert!(group.get("gone").unwrap().is_null());
        assert_eq!(group.get("label").unwrap().as_str(), Some("job-7"));
        assert_eq!(group.get("flag").unwrap().as_bool(), Some(true));
        assert_eq!(group.get("gone").unwrap().as_str(), None,
                   "el centinela nunca queda como string");
    }

    #[test]
    fn evaluating_a_null_attribute_is_an_error() {
        let merged = merged_from(&[r#"{"a": {"x": "None"}}"#]);
        let err = ParameterRoot::materialize(&merged, &evals(&[("a", &["x"])]), &[]).unwrap_err();
        assert!(matches!(err, ParamsError::Evaluation { .. }));
    }

    #[test]
    fn group_order_follows_sequence_then_insertion() {
        let merged = merged_from(&[r#"{"b": {"x": 1}, "a": {"y": 2}, "c": {"z": 3}}"#]);
        let root = ParameterRoot::materialize(&merged, &Evaluations::new(), &["a"]).unwrap();
        let names: Vec<&str> = root.groups().map(|g| g.name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn merged_scalars_do_not_become_groups() {
        let merged = merged_from(&[r#"{"title": "demo", "a": {"x": 1}}"#]);
        let root = ParameterRoot::materialize(&merged, &Evaluations::new(), &[]).unwrap();
        assert_eq!(root.len(), 1);
        assert_eq!(merged.get_scalar("title"), Some(&json!("demo")));
    }
}
