/*
* KWindowRestore
* Copyright (C) 2026 The KWindowRestore authors
*
* This program is free software; you can redistribute it and/or modify
* it under the terms of the GNU General Public License as published by
* the Free Software Foundation; either version 2 of the License, or
* (at your option) any later version.
*
* This program is distributed in the hope that it will be useful,
* but WITHOUT ANY WARRANTY; without even the implied warranty of
* MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
* GNU General Public License for more details.
*
* You should have received a copy of the GNU General Public License along
* with this program; if not, write to the Free Software Foundation, Inc.,
* 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.
*/

use crate::error::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// The saved window snapshot on disk. The contents are whatever
/// the KWin script handed us; we never look inside.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<String> {
        let mut file = File::open(&self.path).map_err(|e| Error::from_io(&self.path, e))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::from_io(&self.path, e))?;

        trace!("Read {} bytes from {}", content.len(), self.path.display());
        Ok(content)
    }

    /// Replaces the file contents. Not atomic, a failed write may leave
    /// a truncated file behind.
    pub fn store(&self, data: &str) -> Result<()> {
        // Truncation means the file exists, so NotFound here is really an I/O problem
        let io_err = |e: std::io::Error| Error::Io { path: self.path.clone(), source: e };

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(io_err)?;
        file.write_all(data.as_bytes()).map_err(io_err)?;
        file.flush().map_err(io_err)?;

        trace!("Wrote {} bytes to {}", data.len(), self.path.display());
        Ok(())
    }
}
