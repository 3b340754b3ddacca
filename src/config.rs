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

use crate::paths;
use crate::scripting::{ScriptKind, Scripts};
use anyhow::Result;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use strum::IntoEnumIterator;

const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all(deserialize = "kebab-case"), default, deny_unknown_fields)]
pub struct Config {
    /// Defaults to wherever the daemon binary lives
    pub script_dir: Option<PathBuf>,
    pub save_script: String,
    pub restore_script: String,
    /// Defaults to $XDG_DATA_HOME/kwindowrestore.json
    pub data_file: Option<PathBuf>,
    pub call_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            script_dir: None,
            save_script: "kwin_save.js".into(),
            restore_script: "kwin_restore.js".into(),
            data_file: None,
            call_timeout_ms: 25_000,
        }
    }
}

impl Config {
    /// Load the config, a missing file just means defaults.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None => paths::config_home()?.join(paths::CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
        };

        let config = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => bail!("Failed to read {}: {}", path.display(), e),
        };

        Self::parse(&config).map_err(|e| anyhow!("Invalid config {}: {}", path.display(), e))
    }

    pub fn parse(config: &str) -> Result<Self> {
        // An empty file deserialises to unit, not to an empty map
        if config.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(config)?)
    }

    pub fn data_file(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(p) => Ok(p.clone()),
            None => paths::default_data_file(),
        }
    }

    pub fn scripts(&self) -> Result<Scripts> {
        let dir = match &self.script_dir {
            Some(d) => d.clone(),
            None => paths::executable_dir()?,
        };
        Ok(self.scripts_in(&dir))
    }

    fn scripts_in(&self, dir: &Path) -> Scripts {
        Scripts {
            save: dir.join(&self.save_script),
            restore: dir.join(&self.restore_script),
        }
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }
}

/// KWin only complains about a bad path once a trigger comes in,
/// so point it out early.
pub fn check_scripts(scripts: &Scripts) {
    for kind in ScriptKind::iter() {
        let path = scripts.path(kind);
        if !path.is_file() {
            warn!("The {} script {} does not exist", kind, path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert_eq!(Config::parse("{}").unwrap(), Config::default());
    }

    #[test]
    fn parse_all_keys() {
        let config = Config::parse(
            "script-dir: /usr/share/kwindowrestore\n\
             save-script: save.js\n\
             restore-script: restore.js\n\
             data-file: /tmp/windows.json\n\
             call-timeout-ms: 500\n",
        )
        .unwrap();

        assert_eq!(config.data_file().unwrap(), PathBuf::from("/tmp/windows.json"));
        assert_eq!(config.call_timeout(), Duration::from_millis(500));

        let scripts = config.scripts().unwrap();
        assert_eq!(scripts.save, PathBuf::from("/usr/share/kwindowrestore/save.js"));
        assert_eq!(scripts.restore, PathBuf::from("/usr/share/kwindowrestore/restore.js"));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = Config::parse("call-timeout-ms: 1000\n").unwrap();
        assert_eq!(config.save_script, "kwin_save.js");

        let scripts = config.scripts_in(Path::new("/opt/kwr"));
        assert_eq!(scripts.restore, PathBuf::from("/opt/kwr/kwin_restore.js"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("save_script: x.js\n").is_err());
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(Some(dir.path().join("config.yaml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "data-file: /srv/windows.json\n").unwrap();

        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.data_file, Some(PathBuf::from("/srv/windows.json")));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "call-timeout-ms: [not, a, number]\n").unwrap();

        assert!(Config::load(Some(path)).is_err());
    }
}
