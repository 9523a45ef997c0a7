#![allow(dead_code)]

use serde_json::{Value, json};

/// Returns a minimal valid model named `name` in `namespace`.
pub fn model(name: &str, namespace: &str, engine: &str) -> Value {
    json!({
        "apiVersion": "kubeai.org/v1",
        "kind": "Model",
        "metadata": {"name": name, "namespace": namespace},
        "spec": {"url": format!("ollama://{name}"), "engine": engine},
    })
}

/// Returns the `llama3` model in the `default` namespace served by Ollama.
pub fn llama3() -> Value {
    model("llama3", "default", "OLlama")
}

/// Returns a speech-to-text model in the `default` namespace.
pub fn whisper() -> Value {
    json!({
        "apiVersion": "kubeai.org/v1",
        "kind": "Model",
        "metadata": {"name": "whisper", "namespace": "default"},
        "spec": {
            "url": "hf://Systran/faster-whisper-medium-en",
            "engine": "FasterWhisper",
            "features": ["SpeechToText"],
            "resourceProfile": "cpu:1",
        },
    })
}

/// Sets the annotation `key` on `model`.
pub fn annotate(model: &mut Value, key: &str, value: &str) {
    model["metadata"]["annotations"][key] = json!(value);
}
