// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `matwrite validate` command - Validate configuration file.

use std::error::Error;
use std::path::Path;

use matwrite_core::ConfigLoader;

pub fn execute(file: &Path) -> anyhow::Result<()> {
    tracing::info!(file = %file.display(), "Validating configuration");

    match ConfigLoader::load_file(file) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Matrix:          {} x {}", config.rows, config.cols);
            println!("Row Format:      {:?}", config.format.as_str());
            println!("Iterations:      {}", config.iterations);
            println!("Repeat:          {}", config.repeat);
            println!("Output Path:     {}", config.output_path.display());
            println!(
                "Seed:            {}",
                config
                    .seed
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "random".to_string())
            );
            println!("Verify Output:   {}", config.verify);
            println!("Matrix Refresh:  {:?}", config.matrix_refresh);
            println!();
            println!("Strategies ({}):", config.strategies.len());
            for strategy in &config.strategies {
                println!("  {} - {}", strategy.label(), strategy);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed:");
            eprintln!("  {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            std::process::exit(1);
        }
    }
}
