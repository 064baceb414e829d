//! `modell3d`: the published 3D model of an object
//!
//! A model is present when `<model_dir>/<object>/` exists. It must then hold exactly
//! one reduced OBJ mesh and exactly one reduced MTL file; anything else is an error
//! and no portal metadata is requested.

use std::path::{Path, PathBuf};

use super::{BuildError, RowContext, title};
use crate::config::{ImportSettings, ModelSettings};
use crate::enrich::MetadataEnricher;
use crate::models::AttributeList;

const OBJ_SUFFIX: &str = "_reduziert.obj";
const MTL_SUFFIX: &str = "_reduziert.mtl";

/// File names of a model directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    pub obj: String,
    pub mtl: String,
}

/// Look for the model files of `object_id` under `model_dir`.
///
/// `Ok(None)` when the object has no model directory.
pub async fn find_model_files(
    model_dir: &Path,
    object_id: &str,
) -> Result<Option<ModelFiles>, BuildError> {
    let dir = model_dir.join(object_id);
    let io_err = |path: &PathBuf, e: std::io::Error| BuildError::Io {
        path: path.clone(),
        message: e.to_string(),
    };

    match tokio::fs::metadata(&dir).await {
        Ok(meta) if meta.is_dir() => {}
        _ => return Ok(None),
    }

    let mut obj_files = Vec::new();
    let mut mtl_files = Vec::new();
    let mut entries = tokio::fs::read_dir(&dir)
        .await
        .map_err(|e| io_err(&dir, e))?;
    while let Some(entry) = entries.next_entry().await.map_err(|e| io_err(&dir, e))? {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        if name.ends_with(OBJ_SUFFIX) {
            obj_files.push(name);
        } else if name.ends_with(MTL_SUFFIX) {
            mtl_files.push(name);
        }
    }

    if obj_files.len() != 1 || mtl_files.len() != 1 {
        return Err(BuildError::MissingModelFiles {
            object_id: object_id.to_string(),
            obj_files: obj_files.len(),
            mtl_files: mtl_files.len(),
        });
    }

    match (obj_files.pop(), mtl_files.pop()) {
        (Some(obj), Some(mtl)) => Ok(Some(ModelFiles { obj, mtl })),
        _ => Ok(None),
    }
}

/// Model record, with the technical note taken from the portal document.
pub async fn model3d_attributes(
    ctx: &RowContext<'_>,
    models: &ModelSettings,
    import: &ImportSettings,
    enricher: &MetadataEnricher,
) -> Result<AttributeList, BuildError> {
    let id = ctx.source_id()?;
    let Some(files) = find_model_files(&models.model_dir, id).await? else {
        tracing::debug!("No model directory for {}", id);
        return Ok(AttributeList::new());
    };

    let note = enricher.technical_note(id).await?;
    let remote_path = format!("{}/{}", models.remote_folder.trim_end_matches('/'), id);

    Ok(AttributeList::new()
        .with("FS_ObjektID", ctx.object_id)
        .with("Titel", title(ctx.row)?)
        .with("Modellierer", import.creator_note.as_str())
        .with("TechnischeHinweise", note)
        .with("Lizenz", import.copyright.as_str())
        .with("ModellTyp", "object")
        .with("Dateiname", files.obj)
        .with("Dateiformat", "objmtl")
        .with("DateinameMTL", files.mtl)
        .with("Pfad", remote_path))
}
