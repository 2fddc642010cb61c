use crate::error::{Error, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub fn create_directory(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path).map_err(|e| Error::file_io(path, e))?;
    tracing::debug!("Created directory {:?}", path);
    Ok(true)
}

pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

pub fn copy_file(src: &Path, dst: &Path, overwrite: bool) -> Result<bool> {
    if !overwrite && dst.exists() {
        return Ok(false);
    }
    let mut reader = File::open(src).map_err(|e| Error::file_io(src, e))?;
    let mut writer = File::create(dst).map_err(|e| Error::file_io(dst, e))?;
    io::copy(&mut reader, &mut writer).map_err(|e| Error::file_io(dst, e))?;
    Ok(true)
}

pub fn append_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::file_io(path, e))?;
    file.write_all(bytes).map_err(|e| Error::file_io(path, e))?;
    Ok(())
}

pub fn list_directory(path: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(path)
        .map_err(|e| Error::file_io(path, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::file_io(path, e))?;
    entries.sort();
    Ok(entries)
}

pub fn read_all_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::file_io(path, e))
}

pub(crate) fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}
