use std::path::Path;

use geoconform_kernel::{ContainerConfig, ValidatorContainer};
use serde::Serialize;

use crate::document::Document;

pub fn load_config_or_exit(path: Option<&str>) -> ContainerConfig {
    let Some(path) = path else {
        return ContainerConfig::default();
    };
    let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: failed to read file: {path}: {e}");
        std::process::exit(2);
    });
    ContainerConfig::from_toml_str(&text).unwrap_or_else(|e| {
        eprintln!("error: {path}: {e}");
        std::process::exit(2);
    })
}

pub fn container_or_exit(config: &ContainerConfig) -> ValidatorContainer {
    ValidatorContainer::from_config(config).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(2);
    })
}

pub fn load_document_or_exit(path: &str) -> Document {
    Document::load(Path::new(path)).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(2);
    })
}

pub fn print_json_or_exit<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("error: failed to render json: {e}");
            std::process::exit(2);
        }
    }
}
