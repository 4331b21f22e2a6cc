// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI command implementations.

pub mod run;
pub mod validate;
pub mod verify;
pub mod write;

use std::path::Path;

use matwrite_core::{BenchConfig, ConfigLoader, MatwriteResult};

use crate::MatrixArgs;

/// Load `path` if given, else the reference configuration, then apply
/// command-line overrides.
pub fn load_config(path: Option<&Path>, overrides: &MatrixArgs) -> MatwriteResult<BenchConfig> {
    let mut config = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading configuration");
            ConfigLoader::load_file(path)?
        }
        None => BenchConfig::reference()?,
    };

    if let Some(rows) = overrides.rows {
        config.rows = rows;
    }
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }
    if let Some(output) = &overrides.output {
        config.output_path = output.clone();
    }

    config.revalidate()
}
