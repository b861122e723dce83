use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::constants::manifest::{
    ICNS_FILE, ICONSET_DIR, ICO_FILE, ICO_SIZES, ICO_SOURCE_SIZE, PREVIEW_PNG, PREVIEW_SIZE,
    STANDALONE_PNGS,
};
use crate::icns::{self, IcnsOutcome};
use crate::ico_bundle::write_ico;
use crate::render::{render_icon, render_to_png};

/// What a generation run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Files written to the output directory, in creation order
    pub written: Vec<PathBuf>,
    pub icns: IcnsOutcome,
}

/// Drives the fixed size sweep: standalone PNGs, ICO, the 1024px preview and
/// finally ICNS (converted or placeholder).
pub struct IconGenerator {
    config: Config,
    quiet: bool,
}

impl IconGenerator {
    pub fn new(config: Config) -> Self {
        IconGenerator {
            config,
            quiet: false,
        }
    }

    /// Suppress progress output. Failures are still printed.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output.dir
    }

    pub fn run(&self) -> Result<GenerationReport> {
        let out = self.output_dir();
        fs::create_dir_all(out)
            .with_context(|| format!("Failed to create output directory: {}", out.display()))?;

        let mut written = Vec::new();

        for &(filename, size) in STANDALONE_PNGS {
            let path = out.join(filename);
            render_to_png(size, &path)?;
            self.progress(&format!("✓ Created {} ({}x{})", filename, size, size));
            written.push(path);
        }

        let ico_path = out.join(ICO_FILE);
        let ico_source = render_icon(ICO_SOURCE_SIZE)?;
        write_ico(&ico_source, ICO_SIZES, &ico_path)?;
        self.progress(&format!("✓ Created {} ({:?})", ICO_FILE, ICO_SIZES));
        written.push(ico_path);

        let preview_path = out.join(PREVIEW_PNG);
        render_to_png(PREVIEW_SIZE, &preview_path)?;
        self.progress(&format!("✓ Created {}", PREVIEW_PNG));
        written.push(preview_path);

        let icns = self.build_icns(&mut written)?;

        self.progress(&format!("✅ All icons generated in {}", out.display()));

        Ok(GenerationReport { written, icns })
    }

    fn build_icns(&self, written: &mut Vec<PathBuf>) -> Result<IcnsOutcome> {
        let out = self.output_dir();
        let icns_path = self.config.icns_path();

        let converter = if self.config.converter.enabled {
            icns::find_converter(&self.config.converter.program)
        } else {
            None
        };

        let Some(converter) = converter else {
            icns::write_placeholder(&icns_path)?;
            self.progress(&format!("✓ Created placeholder {}", ICNS_FILE));
            written.push(icns_path);
            return Ok(IcnsOutcome::Placeholder);
        };

        let iconset_dir = out.join(ICONSET_DIR);
        icns::stage_iconset(&iconset_dir)?;

        match icns::run_converter(&converter, &iconset_dir, &icns_path) {
            Ok(()) => {
                fs::remove_dir_all(&iconset_dir).with_context(|| {
                    format!("Failed to remove iconset directory: {}", iconset_dir.display())
                })?;
                self.progress(&format!("✓ Created {}", ICNS_FILE));
                written.push(icns_path);
                Ok(IcnsOutcome::Converted)
            }
            Err(e) => {
                let reason = format!("{:#}", e);
                eprintln!("❌ Failed to create {}: {}", ICNS_FILE, reason);
                Ok(IcnsOutcome::ConversionFailed(reason))
            }
        }
    }

    fn progress(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }
}
