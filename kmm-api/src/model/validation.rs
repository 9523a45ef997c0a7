//! Structural validation of `Model` resources.
//!
//! The validator walks an arbitrary JSON value, checks every field of the
//! schema and collects all violations instead of stopping at the first one.
//! Fields the schema does not know about are tolerated and dropped. While
//! walking, a normalized copy holding only known fields is built; in strict
//! mode that copy is deserialized into a typed [`Model`].

use serde_json::{Map, Number, Value};

use crate::model::errors::{FieldErrors, REQUEST_PATH, REQUIRED};
use crate::model::types::{API_VERSION, Engine, Feature, KIND, LoadBalancingStrategy, Model};

/// How required fields are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Used before anything is sent to or trusted from the cluster.
    Strict,
    /// Used for form drafts: blank required strings count as missing.
    Draft,
}

/// Validates `value` and converts it into a [`Model`].
///
/// Every violated field path is reported in the returned [`FieldErrors`].
pub fn validate_model(value: &Value) -> Result<Model, FieldErrors> {
    let mut validator = Validator::new(ValidationMode::Strict);
    let normalized = validator.model(value);

    match normalized {
        Some(normalized) if validator.errors.is_empty() => serde_json::from_value(normalized)
            .map_err(|e| FieldErrors::single(REQUEST_PATH, e.to_string())),
        _ => Err(validator.errors),
    }
}

/// Validates a form draft and returns every field error, empty when the draft
/// can be submitted.
pub fn validate_draft(value: &Value) -> FieldErrors {
    let mut validator = Validator::new(ValidationMode::Draft);
    validator.model(value);
    validator.errors
}

/// Signature shared by every field check: `(validator, path, value) -> normalized value`.
type Check<'a> = &'a dyn Fn(&mut Validator, &str, &Value) -> Option<Value>;

struct Validator {
    mode: ValidationMode,
    errors: FieldErrors,
}

impl Validator {
    fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            errors: FieldErrors::new(),
        }
    }

    fn model(&mut self, value: &Value) -> Option<Value> {
        let object = self.object(REQUEST_PATH, value)?;
        let mut out = Map::new();

        self.required(&mut out, object, REQUEST_PATH, "apiVersion", &|v, path, value| {
            v.literal(path, value, API_VERSION)
        });
        self.required(&mut out, object, REQUEST_PATH, "kind", &|v, path, value| {
            v.literal(path, value, KIND)
        });
        self.required(&mut out, object, REQUEST_PATH, "metadata", &Self::metadata);
        self.required(&mut out, object, REQUEST_PATH, "spec", &Self::spec);
        self.optional(&mut out, object, REQUEST_PATH, "status", &Self::status);

        Some(Value::Object(out))
    }

    fn metadata(&mut self, path: &str, value: &Value) -> Option<Value> {
        let object = self.object(path, value)?;
        let mut out = Map::new();

        for key in [
            "name",
            "namespace",
            "uid",
            "resourceVersion",
            "creationTimestamp",
        ] {
            self.optional(&mut out, object, path, key, &Self::string);
        }
        self.optional(&mut out, object, path, "labels", &Self::string_map);
        self.optional(&mut out, object, path, "annotations", &Self::string_map);

        Some(Value::Object(out))
    }

    fn spec(&mut self, path: &str, value: &Value) -> Option<Value> {
        let object = self.object(path, value)?;
        let mut out = Map::new();

        self.required(&mut out, object, path, "url", &Self::string);
        self.required(&mut out, object, path, "engine", &|v, path, value| {
            v.enumeration(path, value, &Engine::ALL.map(|engine| engine.as_str()))
        });
        self.optional(&mut out, object, path, "adapters", &|v, path, value| {
            v.list(path, value, &Self::adapter)
        });
        self.optional(&mut out, object, path, "features", &|v, path, value| {
            v.list(path, value, &|v, path, value| {
                v.enumeration(path, value, &Feature::ALL.map(|feature| feature.as_str()))
            })
        });
        for key in [
            "resourceProfile",
            "cacheProfile",
            "image",
            "owner",
            "priorityClassName",
        ] {
            self.optional(&mut out, object, path, key, &Self::string);
        }
        self.optional(&mut out, object, path, "args", &|v, path, value| {
            v.list(path, value, &Self::string)
        });
        self.optional(&mut out, object, path, "env", &Self::string_map);
        self.optional(&mut out, object, path, "envFrom", &|v, path, value| {
            v.list(path, value, &Self::env_from_source)
        });
        for key in ["replicas", "minReplicas", "maxReplicas"] {
            self.optional(&mut out, object, path, key, &Self::non_negative_integer);
        }
        self.optional(&mut out, object, path, "autoscalingDisabled", &Self::boolean);
        self.optional(&mut out, object, path, "targetRequests", &Self::number);
        self.optional(&mut out, object, path, "scaleDownDelaySeconds", &Self::integer);
        self.optional(&mut out, object, path, "loadBalancing", &Self::load_balancing);
        self.optional(&mut out, object, path, "files", &|v, path, value| {
            v.list(path, value, &Self::file)
        });

        Some(Value::Object(out))
    }

    fn status(&mut self, path: &str, value: &Value) -> Option<Value> {
        let object = self.object(path, value)?;
        let mut out = Map::new();

        self.optional(&mut out, object, path, "replicas", &|v, path, value| {
            let object = v.object(path, value)?;
            let mut out = Map::new();
            v.optional(&mut out, object, path, "all", &Self::integer);
            v.optional(&mut out, object, path, "ready", &Self::integer);
            Some(Value::Object(out))
        });
        self.optional(&mut out, object, path, "cache", &|v, path, value| {
            let object = v.object(path, value)?;
            let mut out = Map::new();
            v.optional(&mut out, object, path, "loaded", &Self::boolean);
            Some(Value::Object(out))
        });

        Some(Value::Object(out))
    }

    fn adapter(&mut self, path: &str, value: &Value) -> Option<Value> {
        let object = self.object(path, value)?;
        let mut out = Map::new();

        self.required(&mut out, object, path, "name", &Self::string);
        self.optional(&mut out, object, path, "url", &Self::absolute_url);

        Some(Value::Object(out))
    }

    fn env_from_source(&mut self, path: &str, value: &Value) -> Option<Value> {
        let object = self.object(path, value)?;
        let mut out = Map::new();

        self.optional(&mut out, object, path, "prefix", &Self::string);
        for key in ["configMapRef", "secretRef"] {
            self.optional(&mut out, object, path, key, &|v, path, value| {
                let object = v.object(path, value)?;
                let mut out = Map::new();
                v.optional(&mut out, object, path, "name", &Self::string);
                v.optional(&mut out, object, path, "optional", &Self::boolean);
                Some(Value::Object(out))
            });
        }

        Some(Value::Object(out))
    }

    fn load_balancing(&mut self, path: &str, value: &Value) -> Option<Value> {
        let object = self.object(path, value)?;
        let mut out = Map::new();

        self.optional(&mut out, object, path, "strategy", &|v, path, value| {
            v.enumeration(
                path,
                value,
                &LoadBalancingStrategy::ALL.map(|strategy| strategy.as_str()),
            )
        });
        self.optional(&mut out, object, path, "prefixHash", &|v, path, value| {
            let object = v.object(path, value)?;
            let mut out = Map::new();
            v.optional(&mut out, object, path, "meanLoadFactor", &Self::number);
            v.optional(&mut out, object, path, "replication", &Self::integer);
            v.optional(&mut out, object, path, "prefixCharLength", &Self::integer);
            Some(Value::Object(out))
        });

        Some(Value::Object(out))
    }

    fn file(&mut self, path: &str, value: &Value) -> Option<Value> {
        let object = self.object(path, value)?;
        let mut out = Map::new();

        self.required(&mut out, object, path, "path", &Self::string);
        // An empty file is legitimate, so blank content is never "missing".
        match object.get("content") {
            None | Some(Value::Null) => self.errors.add(join(path, "content"), REQUIRED),
            Some(content) => {
                if let Some(content) = self.string(&join(path, "content"), content) {
                    out.insert("content".to_string(), content);
                }
            }
        }

        Some(Value::Object(out))
    }

    /// Checks a required field; absent and `null` values are reported as missing.
    fn required(
        &mut self,
        out: &mut Map<String, Value>,
        object: &Map<String, Value>,
        parent: &str,
        key: &str,
        check: Check<'_>,
    ) {
        let path = join(parent, key);
        match object.get(key) {
            None | Some(Value::Null) => self.errors.add(path, REQUIRED),
            Some(Value::String(s)) if self.mode == ValidationMode::Draft && s.trim().is_empty() => {
                self.errors.add(path, REQUIRED)
            }
            Some(value) => {
                if let Some(normalized) = check(self, &path, value) {
                    out.insert(key.to_string(), normalized);
                }
            }
        }
    }

    /// Checks an optional field; `null` is treated the same as absent.
    fn optional(
        &mut self,
        out: &mut Map<String, Value>,
        object: &Map<String, Value>,
        parent: &str,
        key: &str,
        check: Check<'_>,
    ) {
        match object.get(key) {
            None | Some(Value::Null) => {}
            Some(value) => {
                let path = join(parent, key);
                if let Some(normalized) = check(self, &path, value) {
                    out.insert(key.to_string(), normalized);
                }
            }
        }
    }

    fn object<'v>(&mut self, path: &str, value: &'v Value) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(object) => Some(object),
            other => {
                self.type_mismatch(path, "object", other);
                None
            }
        }
    }

    fn list(&mut self, path: &str, value: &Value, item: Check<'_>) -> Option<Value> {
        let Value::Array(items) = value else {
            self.type_mismatch(path, "array", value);
            return None;
        };

        let normalized: Vec<Value> = items
            .iter()
            .enumerate()
            .filter_map(|(index, value)| item(self, &join(path, &index.to_string()), value))
            .collect();

        Some(Value::Array(normalized))
    }

    fn string_map(&mut self, path: &str, value: &Value) -> Option<Value> {
        let object = self.object(path, value)?;
        let mut out = Map::new();

        for (key, value) in object {
            if let Some(value) = self.string(&join_key(path, key), value) {
                out.insert(key.clone(), value);
            }
        }

        Some(Value::Object(out))
    }

    fn string(&mut self, path: &str, value: &Value) -> Option<Value> {
        match value {
            Value::String(_) => Some(value.clone()),
            other => {
                self.type_mismatch(path, "string", other);
                None
            }
        }
    }

    fn boolean(&mut self, path: &str, value: &Value) -> Option<Value> {
        match value {
            Value::Bool(_) => Some(value.clone()),
            other => {
                self.type_mismatch(path, "boolean", other);
                None
            }
        }
    }

    fn number(&mut self, path: &str, value: &Value) -> Option<Value> {
        match value {
            Value::Number(_) => Some(value.clone()),
            other => {
                self.type_mismatch(path, "number", other);
                None
            }
        }
    }

    fn integer(&mut self, path: &str, value: &Value) -> Option<Value> {
        let Value::Number(number) = value else {
            self.type_mismatch(path, "number", value);
            return None;
        };

        match as_integer(number) {
            Some(Integer::Signed(n)) => Some(Value::from(n)),
            Some(Integer::Unsigned(_) | Integer::TooLarge) => {
                self.errors.add(
                    path,
                    format!("Number must be less than or equal to {}", i64::MAX),
                );
                None
            }
            Some(Integer::TooSmall) => {
                self.errors.add(
                    path,
                    format!("Number must be greater than or equal to {}", i64::MIN),
                );
                None
            }
            None => {
                self.errors.add(path, "Expected integer, received float");
                None
            }
        }
    }

    fn non_negative_integer(&mut self, path: &str, value: &Value) -> Option<Value> {
        let Value::Number(number) = value else {
            self.type_mismatch(path, "number", value);
            return None;
        };

        let integer = as_integer(number);
        let negative = number.as_f64().is_some_and(|n| n < 0.0);

        match integer {
            None => self.errors.add(path, "Expected integer, received float"),
            Some(Integer::TooLarge) => self.errors.add(
                path,
                format!("Number must be less than or equal to {}", u64::MAX),
            ),
            _ => {}
        }
        if negative {
            self.errors
                .add(path, "Number must be greater than or equal to 0");
        }

        match integer {
            Some(Integer::Unsigned(n)) => Some(Value::from(n)),
            Some(Integer::Signed(n)) if n >= 0 => Some(Value::from(n as u64)),
            _ => None,
        }
    }

    fn literal(&mut self, path: &str, value: &Value, expected: &str) -> Option<Value> {
        match value {
            Value::String(s) if s == expected => Some(value.clone()),
            _ => {
                self.errors.add(
                    path,
                    format!("Invalid literal value, expected \"{expected}\""),
                );
                None
            }
        }
    }

    fn enumeration(&mut self, path: &str, value: &Value, allowed: &[&str]) -> Option<Value> {
        let Value::String(s) = value else {
            self.type_mismatch(path, "string", value);
            return None;
        };

        if allowed.contains(&s.as_str()) {
            return Some(value.clone());
        }

        let expected = allowed
            .iter()
            .map(|allowed| format!("'{allowed}'"))
            .collect::<Vec<_>>()
            .join(" | ");
        self.errors.add(
            path,
            format!("Invalid enum value. Expected {expected}, received '{s}'"),
        );
        None
    }

    fn absolute_url(&mut self, path: &str, value: &Value) -> Option<Value> {
        let Value::String(s) = value else {
            self.type_mismatch(path, "string", value);
            return None;
        };

        match url::Url::parse(s) {
            Ok(_) => Some(value.clone()),
            Err(_) => {
                self.errors.add(path, "Invalid url");
                None
            }
        }
    }

    fn type_mismatch(&mut self, path: &str, expected: &str, received: &Value) {
        self.errors.add(
            path,
            format!("Expected {expected}, received {}", type_name(received)),
        );
    }
}

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

#[derive(Clone, Copy)]
enum Integer {
    Signed(i64),
    Unsigned(u64),
    TooLarge,
    TooSmall,
}

/// Returns the integral value of `number`, accepting floats without a
/// fractional part such as `3.0` or `1e16`.
fn as_integer(number: &Number) -> Option<Integer> {
    if let Some(n) = number.as_i64() {
        return Some(Integer::Signed(n));
    }
    if let Some(n) = number.as_u64() {
        return Some(Integer::Unsigned(n));
    }

    let n = number.as_f64()?;
    if !n.is_finite() || n.fract() != 0.0 {
        return None;
    }
    // Integral floats inside these ranges convert exactly.
    let integer = if n < -TWO_POW_63 {
        Integer::TooSmall
    } else if n < TWO_POW_63 {
        Integer::Signed(n as i64)
    } else if n < TWO_POW_64 {
        Integer::Unsigned(n as u64)
    } else {
        Integer::TooLarge
    };
    Some(integer)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Joins a user-chosen map key onto `parent`.
///
/// Keys that would not survive splitting on `.` are written as a quoted
/// JSON string in brackets, e.g. `metadata.annotations["openrouter.ai/name"]`.
fn join_key(parent: &str, key: &str) -> String {
    let plain = !key.is_empty() && !key.contains(['.', '[', ']', '"']);
    if plain {
        join(parent, key)
    } else {
        format!("{parent}[{}]", Value::from(key))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::types::{LoadBalancingStrategy, ModelSpec};

    fn minimal() -> Value {
        json!({
            "apiVersion": "kubeai.org/v1",
            "kind": "Model",
            "metadata": {"name": "llama3", "namespace": "default"},
            "spec": {"url": "ollama://llama3", "engine": "OLlama"},
        })
    }

    fn full() -> Value {
        json!({
            "apiVersion": "kubeai.org/v1",
            "kind": "Model",
            "metadata": {
                "name": "whisper",
                "namespace": "speech",
                "labels": {"team": "audio"},
                "annotations": {"openrouter.ai/name": "Whisper"},
                "uid": "8f1c",
                "resourceVersion": "42",
                "creationTimestamp": "2024-05-01T12:00:00Z"
            },
            "spec": {
                "url": "hf://openai/whisper-large-v3",
                "adapters": [{"name": "lora", "url": "https://example.com/lora"}],
                "features": ["SpeechToText"],
                "engine": "FasterWhisper",
                "resourceProfile": "nvidia-gpu-l4:1",
                "cacheProfile": "standard",
                "image": "ghcr.io/kubeai/whisper:latest",
                "args": ["--beam-size", "5"],
                "env": {"HF_HOME": "/cache"},
                "envFrom": [{"prefix": "HF_", "secretRef": {"name": "hf", "optional": true}}],
                "replicas": 1,
                "minReplicas": 0,
                "maxReplicas": 3,
                "autoscalingDisabled": false,
                "targetRequests": 2.5,
                "scaleDownDelaySeconds": 30,
                "owner": "speech-team",
                "loadBalancing": {
                    "strategy": "PrefixHash",
                    "prefixHash": {"meanLoadFactor": 1.25, "replication": 256, "prefixCharLength": 100}
                },
                "files": [{"path": "/config/extra.yaml", "content": "a: b"}],
                "priorityClassName": "high"
            },
            "status": {"replicas": {"all": 1, "ready": 1}, "cache": {"loaded": true}}
        })
    }

    #[test]
    fn accepts_minimal_model() {
        let model = validate_model(&minimal()).unwrap();

        assert_eq!(model.name(), "llama3");
        assert_eq!(model.namespace(), "default");
        assert_eq!(model.spec, ModelSpec::new("ollama://llama3", Engine::Ollama));
        assert!(model.status.is_none());
    }

    #[test]
    fn full_model_round_trips_unchanged() {
        let input = full();
        let model = validate_model(&input).unwrap();

        assert_eq!(model.to_value().unwrap(), input);
        assert!(model.has_feature(Feature::SpeechToText));
        assert_eq!(
            model.spec.load_balancing.unwrap().strategy,
            Some(LoadBalancingStrategy::PrefixHash)
        );
    }

    #[test]
    fn unknown_fields_are_tolerated_and_dropped() {
        let mut input = minimal();
        input["metadata"]["finalizers"] = json!(["kubeai.org/finalizer"]);
        input["spec"]["somethingNew"] = json!(true);

        let model = validate_model(&input).unwrap();

        assert_eq!(model.to_value().unwrap(), minimal());
    }

    #[test]
    fn missing_url_and_engine_are_both_reported() {
        let mut input = minimal();
        input["spec"] = json!({});

        let errors = validate_model(&input).unwrap_err();

        assert_eq!(errors.paths().collect::<Vec<_>>(), vec!["spec.engine", "spec.url"]);
        assert_eq!(errors.get("spec.url").unwrap(), ["Required"]);
        assert_eq!(errors.get("spec.engine").unwrap(), ["Required"]);
    }

    #[test]
    fn engine_outside_enum_is_rejected_case_sensitively() {
        for engine in ["ollama", "TGI", ""] {
            let mut input = minimal();
            input["spec"]["engine"] = json!(engine);

            let errors = validate_model(&input).unwrap_err();

            assert_eq!(errors.paths().collect::<Vec<_>>(), vec!["spec.engine"]);
            assert_eq!(
                errors.get("spec.engine").unwrap()[0],
                format!(
                    "Invalid enum value. Expected 'OLlama' | 'VLLM' | 'FasterWhisper' | 'Infinity', received '{engine}'"
                )
            );
        }
    }

    #[test]
    fn literals_must_match_exactly() {
        let mut input = minimal();
        input["apiVersion"] = json!("kubeai.org/v2");
        input["kind"] = json!("model");

        let errors = validate_model(&input).unwrap_err();

        assert_eq!(
            errors.get("apiVersion").unwrap(),
            ["Invalid literal value, expected \"kubeai.org/v1\""]
        );
        assert_eq!(
            errors.get("kind").unwrap(),
            ["Invalid literal value, expected \"Model\""]
        );
    }

    #[test]
    fn replicas_must_be_non_negative_integers() {
        let mut input = minimal();
        input["spec"]["replicas"] = json!(-1);
        input["spec"]["minReplicas"] = json!(1.5);
        input["spec"]["maxReplicas"] = json!("3");

        let errors = validate_model(&input).unwrap_err();

        assert_eq!(
            errors.get("spec.replicas").unwrap(),
            ["Number must be greater than or equal to 0"]
        );
        assert_eq!(
            errors.get("spec.minReplicas").unwrap(),
            ["Expected integer, received float"]
        );
        assert_eq!(
            errors.get("spec.maxReplicas").unwrap(),
            ["Expected number, received string"]
        );
    }

    #[test]
    fn integral_floats_are_normalized_to_integers() {
        let mut input = minimal();
        input["spec"]["replicas"] = json!(2.0);
        input["spec"]["scaleDownDelaySeconds"] = json!(-30.0);

        let model = validate_model(&input).unwrap();

        assert_eq!(model.spec.replicas, Some(2));
        assert_eq!(model.spec.scale_down_delay_seconds, Some(-30));
    }

    #[test]
    fn nested_list_errors_carry_item_index() {
        let mut input = minimal();
        input["spec"]["features"] = json!(["TextGeneration", "Vision"]);
        input["spec"]["adapters"] = json!([{"url": "not a url"}]);
        input["spec"]["files"] = json!([{"path": "/a"}]);
        input["spec"]["args"] = json!(["--ok", 7]);

        let errors = validate_model(&input).unwrap_err();

        assert_eq!(
            errors.paths().collect::<Vec<_>>(),
            vec![
                "spec.adapters.0.name",
                "spec.adapters.0.url",
                "spec.args.1",
                "spec.features.1",
                "spec.files.0.content",
            ]
        );
        assert_eq!(errors.get("spec.adapters.0.url").unwrap(), ["Invalid url"]);
    }

    #[test]
    fn string_maps_reject_non_string_values() {
        let mut input = minimal();
        input["metadata"]["labels"] = json!({"tier": 1});
        input["spec"]["env"] = json!({"DEBUG": true});

        let errors = validate_model(&input).unwrap_err();

        assert_eq!(
            errors.get("metadata.labels.tier").unwrap(),
            ["Expected string, received number"]
        );
        assert_eq!(
            errors.get("spec.env.DEBUG").unwrap(),
            ["Expected string, received boolean"]
        );
    }

    #[test]
    fn map_keys_with_dots_are_quoted_in_paths() {
        let mut input = minimal();
        input["metadata"]["annotations"] = json!({"openrouter.ai/name": 1, "team": false});

        let errors = validate_model(&input).unwrap_err();

        assert_eq!(
            errors.paths().collect::<Vec<_>>(),
            vec![
                "metadata.annotations.team",
                "metadata.annotations[\"openrouter.ai/name\"]",
            ]
        );
    }

    #[test]
    fn large_integral_floats_are_range_checked() {
        let mut input = minimal();
        input["spec"]["replicas"] = json!(1e16);
        input["spec"]["maxReplicas"] = json!(1e20);
        input["spec"]["scaleDownDelaySeconds"] = json!(-1e19);

        let errors = validate_model(&input).unwrap_err();

        assert!(errors.get("spec.replicas").is_none());
        assert_eq!(
            errors.get("spec.maxReplicas").unwrap(),
            ["Number must be less than or equal to 18446744073709551615"]
        );
        assert_eq!(
            errors.get("spec.scaleDownDelaySeconds").unwrap(),
            ["Number must be greater than or equal to -9223372036854775808"]
        );
    }

    #[test]
    fn large_integral_float_is_normalized() {
        let mut input = minimal();
        input["spec"]["replicas"] = json!(1e16);

        let model = validate_model(&input).unwrap();

        assert_eq!(model.spec.replicas, Some(10_000_000_000_000_000));
    }

    #[test]
    fn load_balancing_strategy_is_an_enum() {
        let mut input = minimal();
        input["spec"]["loadBalancing"] = json!({"strategy": "RoundRobin"});

        let errors = validate_model(&input).unwrap_err();

        assert_eq!(
            errors.get("spec.loadBalancing.strategy").unwrap(),
            ["Invalid enum value. Expected 'LeastLoad' | 'PrefixHash', received 'RoundRobin'"]
        );
    }

    #[test]
    fn status_is_type_checked() {
        let mut input = minimal();
        input["status"] = json!({"replicas": {"ready": "1"}, "cache": {"loaded": "yes"}});

        let errors = validate_model(&input).unwrap_err();

        assert!(errors.contains("status.replicas.ready"));
        assert!(errors.contains("status.cache.loaded"));
    }

    #[test]
    fn non_object_root_is_reported_under_empty_path() {
        let errors = validate_model(&json!([1, 2])).unwrap_err();

        assert_eq!(errors.get("").unwrap(), ["Expected object, received array"]);
    }

    #[test]
    fn null_optional_fields_are_treated_as_absent() {
        let mut input = minimal();
        input["status"] = Value::Null;
        input["spec"]["image"] = Value::Null;

        let model = validate_model(&input).unwrap();

        assert!(model.status.is_none());
        assert!(model.spec.image.is_none());
    }

    #[test]
    fn draft_reports_blank_required_fields() {
        let draft = json!({
            "apiVersion": "kubeai.org/v1",
            "kind": "Model",
            "metadata": {"name": "", "namespace": "default"},
            "spec": {"url": "", "engine": ""},
        });

        let errors = validate_draft(&draft);

        assert_eq!(errors.get("spec.url").unwrap(), ["Required"]);
        assert_eq!(errors.get("spec.engine").unwrap(), ["Required"]);
        // Strict mode accepts an empty url string but still rejects the engine.
        let strict = validate_model(&draft).unwrap_err();
        assert!(!strict.contains("spec.url"));
        assert!(strict.contains("spec.engine"));
    }

    #[test]
    fn draft_of_valid_model_has_no_errors() {
        assert!(validate_draft(&full()).is_empty());
    }
}
