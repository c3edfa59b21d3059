//! Building and checking the `.tar.gz` package uploaded by `compute deploy`.

use std::fs::File;

use camino::{Utf8Path, Utf8PathBuf};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use heck::ToKebabCase;

use crate::manifest::MANIFEST_FILE;
use crate::{EdgeCliError, EdgeResult};

/// Where every build script must leave the compiled module.
pub const WASM_BINARY: &str = "bin/main.wasm";
pub const PACKAGE_DIR: &str = "pkg";

/// Package names are always kebab-cased.
pub fn package_name(name: &str) -> String {
    name.to_kebab_case()
}

/// `pkg/<name>.tar.gz` under `project_dir`.
pub fn package_path(project_dir: &Utf8Path, name: &str) -> Utf8PathBuf {
    project_dir
        .join(PACKAGE_DIR)
        .join(format!("{}.tar.gz", package_name(name)))
}

/// Writes a gzipped tarball holding the manifest, the compiled module and,
/// when `include_source` is set, everything under `src/`. Entries are
/// rooted at a directory named after the package.
pub fn create_package(project_dir: &Utf8Path, name: &str, include_source: bool) -> EdgeResult<Utf8PathBuf> {
    let name = package_name(name);
    let wasm = project_dir.join(WASM_BINARY);
    if !wasm.is_file() {
        return Err(EdgeCliError::MissingWasmBinary {
            path: wasm.to_string(),
        }
        .into());
    }

    let path = package_path(project_dir, &name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let encoder = GzEncoder::new(File::create(&path)?, Compression::default());
    let mut archive = tar::Builder::new(encoder);

    archive.append_path_with_name(project_dir.join(MANIFEST_FILE), format!("{name}/{MANIFEST_FILE}"))?;
    archive.append_path_with_name(&wasm, format!("{name}/{WASM_BINARY}"))?;
    let src = project_dir.join("src");
    if include_source && src.is_dir() {
        archive.append_dir_all(format!("{name}/src"), &src)?;
    }

    archive.into_inner()?.finish()?;
    tracing::debug!(%path, "wrote package");
    Ok(path)
}

/// Checks that `path` is a gzipped tarball containing both the manifest
/// and the compiled module.
pub fn validate_package(path: &Utf8Path) -> EdgeResult<()> {
    let invalid = |reason: String| EdgeCliError::InvalidPackage {
        path: path.to_string(),
        reason,
    };

    let file = File::open(path).map_err(|e| invalid(e.to_string()))?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    let entries = archive.entries().map_err(|e| invalid(e.to_string()))?;

    let (mut has_manifest, mut has_wasm) = (false, false);
    for entry in entries {
        let entry = entry.map_err(|e| invalid(e.to_string()))?;
        let entry_path = entry.path().map_err(|e| invalid(e.to_string()))?.into_owned();
        if entry_path.ends_with(MANIFEST_FILE) {
            has_manifest = true;
        } else if entry_path.ends_with(WASM_BINARY) {
            has_wasm = entry.size() > 0;
        }
    }

    match (has_manifest, has_wasm) {
        (true, true) => Ok(()),
        (false, _) => Err(invalid(format!("it does not contain {MANIFEST_FILE}")).into()),
        (_, false) => Err(invalid(format!("it does not contain {WASM_BINARY}")).into()),
    }
}
