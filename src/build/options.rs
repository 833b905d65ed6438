//! build::options
//!
//! Assembly of the dnt options object.
//!
//! # Precedence
//!
//! 1. Defaults: entry point, output directory, package manager, shims and a
//!    `package` object with the val's name and the configured version.
//! 2. Readme metadata, deep-merged on top. Objects merge key by key; any
//!    other collision is won by the metadata.
//! 3. `entryPoints` and `outDir` are reset to the computed values, so
//!    metadata can never redirect the build.

use serde_json::{json, Value};

use super::traits::BuildRequest;

/// Merge `top` into `base`. Nested objects merge recursively, everything
/// else in `top` replaces what is in `base`.
pub fn overlay(base: &mut Value, top: Value) {
    match (base, top) {
        (Value::Object(base), Value::Object(top)) => {
            for (key, value) in top {
                match base.get_mut(&key) {
                    Some(existing) => overlay(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, top) => *base = top,
    }
}

/// Build the options object for `request`.
pub fn build_options(request: &BuildRequest) -> Value {
    let entry_points = json!([request.entry_point.to_string_lossy()]);
    let out_dir = json!(request.out_dir.to_string_lossy());

    let mut options = json!({
        "entryPoints": entry_points.clone(),
        "outDir": out_dir.clone(),
        "packageManager": request.package_manager.as_str(),
        "shims": { "deno": request.shims.deno },
        "package": {
            "name": request.package_name,
            "version": request.package_version,
        },
    });

    overlay(
        &mut options,
        Value::Object(request.overlay.as_map().clone()),
    );

    if let Value::Object(map) = &mut options {
        map.insert("entryPoints".to_string(), entry_points);
        map.insert("outDir".to_string(), out_dir);
    }
    options
}
