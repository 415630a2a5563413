use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::{Stores, store_files};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy every store file of the configured backend into one archive.
    ///
    /// Without `compress` the files are copied next to `dest_file`
    /// (`<stem>_<collection>.<ext>`); with `compress` a single `.zip` is written.
    pub fn backup(
        stores: &Stores,
        cfg: &Config,
        dest_file: &str,
        force: bool,
        compress: bool,
    ) -> AppResult<Vec<PathBuf>> {
        let dest = Path::new(dest_file);

        if !dest.is_absolute() {
            return Err(AppError::InvalidInput(format!(
                "Backup path must be absolute: {dest_file}"
            )));
        }

        // 1️⃣ collect existing store files
        let sources: Vec<PathBuf> = store_files(cfg).into_iter().filter(|p| p.exists()).collect();
        if sources.is_empty() {
            return Err(AppError::NotFound(format!(
                "no data files in {}",
                cfg.data_dir_path().display()
            )));
        }

        // 2️⃣ ensure destination folder exists
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let written = if compress {
            let zip_path = dest.with_extension("zip");
            check_overwrite(&zip_path, force)?;
            write_zip(&sources, &zip_path)?;
            vec![zip_path]
        } else {
            let mut out = Vec::new();
            for src in &sources {
                let target = sibling_target(dest, src);
                check_overwrite(&target, force)?;
                fs::copy(src, &target)?;
                info(format!("Copied {} → {}", src.display(), target.display()));
                out.push(target);
            }
            out
        };

        for p in &written {
            success(format!("Backup created: {}", p.display()));
        }

        // 3️⃣ log
        ttlog_quiet(
            &stores.log,
            "backup",
            &dest.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(written)
    }
}

fn check_overwrite(path: &Path, force: bool) -> AppResult<()> {
    if path.exists() && !force {
        warning(format!("The file '{}' already exists.", path.display()));
        return Err(AppError::Duplicate(format!(
            "{} (use --force to overwrite)",
            path.display()
        )));
    }
    Ok(())
}

/// `/tmp/bk.json` + `users.json` → `/tmp/bk_users.json`
fn sibling_target(dest: &Path, src: &Path) -> PathBuf {
    let stem = dest
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "backup".to_string());
    let src_name = src
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    dest.with_file_name(format!("{stem}_{src_name}"))
}

/// Compress the store files into one .zip
fn write_zip(sources: &[PathBuf], zip_path: &Path) -> AppResult<()> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for src in sources {
        let name = src
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .ok_or_else(|| AppError::Other(format!("invalid file name: {}", src.display())))?;

        zip.start_file(name, options).map_err(io::Error::other)?;
        let mut f = fs::File::open(src)?;
        io::copy(&mut f, &mut zip)?;
    }

    zip.finish().map_err(io::Error::other)?;
    println!("📦 Compressed: {}", zip_path.display());
    Ok(())
}
