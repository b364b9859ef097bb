// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Markup document serialization and deserialization.
//!
//! This module handles exporting and importing saved markup in YAML
//! and JSON formats, chosen by file extension.

use crate::models::project::MarkupDocument;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|s| s.to_str());
        match extension {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => bail!("Unsupported file extension: {:?}", extension),
        }
    }
}

/// Export a markup document to YAML format.
pub fn export_yaml(doc: &MarkupDocument, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(doc)?;
    std::fs::write(path, yaml).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Export a markup document to JSON format.
pub fn export_json(doc: &MarkupDocument, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(doc)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Import a markup document from YAML format.
pub fn import_yaml(path: &Path) -> Result<MarkupDocument> {
    let yaml = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let doc = serde_yaml::from_str(&yaml)?;
    Ok(doc)
}

/// Import a markup document from JSON format.
pub fn import_json(path: &Path) -> Result<MarkupDocument> {
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let doc = serde_json::from_str(&json)?;
    Ok(doc)
}

/// Export using the format implied by the file extension.
pub fn export(doc: &MarkupDocument, path: &Path) -> Result<()> {
    match Format::from_path(path)? {
        Format::Yaml => export_yaml(doc, path),
        Format::Json => export_json(doc, path),
    }
}

/// Import using the format implied by the file extension.
pub fn import(path: &Path) -> Result<MarkupDocument> {
    match Format::from_path(path)? {
        Format::Yaml => import_yaml(path),
        Format::Json => import_json(path),
    }
}
