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

//! Running one-shot scripts inside the window manager.
//!
//! The scripts do the actual window work and call back into the service
//! to hand over their data. Once done they ask to be unloaded, which is
//! done by plugin name since that's what the window manager keys on.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumIter};

/// The window manager's scripting subsystem.
pub trait ScriptHost: Send + Sync {
    /// Load the script at `path` under `name`. A negative id means the
    /// window manager refused it (usually because `name` is taken).
    fn load_script(&self, path: &Path, name: &str) -> Result<i32>;

    fn run_script(&self, id: i32) -> Result<()>;

    /// Returns false if nothing was loaded under `name`.
    fn unload_script(&self, name: &str) -> Result<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ScriptKind {
    Save,
    Restore,
}

/// Locations of the two companion scripts.
#[derive(Debug, Clone)]
pub struct Scripts {
    pub save: PathBuf,
    pub restore: PathBuf,
}

impl Scripts {
    pub fn path(&self, kind: ScriptKind) -> &Path {
        match kind {
            ScriptKind::Save => &self.save,
            ScriptKind::Restore => &self.restore,
        }
    }
}

pub struct ScriptInvoker {
    host: Box<dyn ScriptHost>,
    name: String,
}

impl ScriptInvoker {
    pub fn new(host: Box<dyn ScriptHost>, name: &str) -> Self {
        Self {
            host,
            name: name.to_string(),
        }
    }

    /// Load and start a script. Doesn't wait for it, the script signals
    /// completion itself by calling UnloadServiceScript.
    ///
    /// Only one script can be registered under our name at a time. If one
    /// still is, the window manager refuses the load and so do we.
    pub fn run_script(&self, path: &Path) -> Result<()> {
        debug!("Loading script {} as '{}'", path.display(), self.name);
        let id = self.host.load_script(path, &self.name)?;
        if id < 0 {
            return Err(Error::invocation(format!(
                "window manager refused to load {} as '{}' (is it already loaded?)",
                path.display(),
                self.name
            )));
        }

        // The id is only needed to start the script, unloading goes by name
        if let Err(e) = self.host.run_script(id) {
            match self.host.unload_script(&self.name) {
                Ok(_) => {}
                Err(e) => warn!("Failed to unload script '{}' after failed run: {}", self.name, e),
            }
            return Err(e);
        }

        info!("Started script {} (id {})", path.display(), id);
        Ok(())
    }

    pub fn unload_script(&self) -> Result<()> {
        match self.host.unload_script(&self.name)? {
            true => {
                debug!("Unloaded script '{}'", self.name);
                Ok(())
            }
            false => Err(Error::invocation(format!(
                "no script is loaded as '{}'",
                self.name
            ))),
        }
    }
}
