use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

use crate::config::SiteConfig;

/// Run all boot checks. Call this before Rocket launches.
/// Creates missing directories, warns about missing data files, and
/// aborts if the site can't serve anything at all.
pub fn run(config: &SiteConfig) {
    info!("Boot check starting...");
    let (warnings, errors) = check(config);

    if errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            errors, warnings
        );
        process::exit(1);
    }

    if warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some pages will render empty.",
            warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
}

/// Returns `(warnings, errors)`.
pub fn check(config: &SiteConfig) -> (u32, u32) {
    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Directories ─────────────────────────────────
    for dir in [&config.data_dir, &config.public_dir] {
        if !dir.exists() {
            match fs::create_dir_all(dir) {
                Ok(_) => info!("  Created directory: {}", dir.display()),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", dir.display(), e);
                    errors += 1;
                }
            }
        } else if !dir.is_dir() {
            error!("  Not a directory: {}", dir.display());
            errors += 1;
        }
    }

    // ── 2. Data files ──────────────────────────────────
    for file in [config.photos_path(), config.socials_path()] {
        if !file.exists() {
            warn!("  Missing data file: {} (page will render empty)", file.display());
            warnings += 1;
        }
    }

    // ── 3. Rocket.toml exists ───────────────────────────
    if !Path::new("Rocket.toml").exists() {
        warn!("  Rocket.toml not found, using default config");
        warnings += 1;
    }

    (warnings, errors)
}
