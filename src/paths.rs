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

// XDG base directory lookups, with context for when they fail.

use anyhow::Result;
use std::env;
use std::path::PathBuf;

pub const DATA_FILE_NAME: &str = "kwindowrestore.json";
pub const CONFIG_DIR_NAME: &str = "kwindowrestore";

/// `$XDG_DATA_HOME`, or `$HOME/.local/share`
pub fn data_home() -> Result<PathBuf> {
    dirs::data_dir().ok_or_else(|| anyhow!("Neither XDG_DATA_HOME nor HOME is set"))
}

/// `$XDG_CONFIG_HOME`, or `$HOME/.config`
pub fn config_home() -> Result<PathBuf> {
    dirs::config_dir().ok_or_else(|| anyhow!("Neither XDG_CONFIG_HOME nor HOME is set"))
}

/// Where the window data lives unless the config says otherwise.
pub fn default_data_file() -> Result<PathBuf> {
    Ok(data_home()?.join(DATA_FILE_NAME))
}

/// The directory the running daemon binary was installed to.
pub fn executable_dir() -> Result<PathBuf> {
    let exe = env::current_exe()?;
    exe.parent()
        .map(|p| p.to_path_buf())
        .ok_or_else(|| anyhow!("Executable {} has no parent directory", exe.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // These read the real environment, so only check what holds for any
    // sane one instead of setting variables under parallel tests.

    #[test]
    fn data_file_is_inside_data_home() {
        let file = default_data_file().unwrap();
        assert_eq!(file.parent(), Some(data_home().unwrap().as_path()));
        assert_eq!(file.file_name().unwrap(), DATA_FILE_NAME);
    }

    #[test]
    fn data_home_follows_xdg() {
        let expected = match env::var_os("XDG_DATA_HOME") {
            Some(dir) if PathBuf::from(&dir).is_absolute() => PathBuf::from(dir),
            _ => dirs::home_dir().unwrap().join(".local/share"),
        };
        assert_eq!(data_home().unwrap(), expected);
    }

    #[test]
    fn config_home_follows_xdg() {
        let expected = match env::var_os("XDG_CONFIG_HOME") {
            Some(dir) if PathBuf::from(&dir).is_absolute() => PathBuf::from(dir),
            _ => dirs::home_dir().unwrap().join(".config"),
        };
        assert_eq!(config_home().unwrap(), expected);
    }

    #[test]
    fn executable_dir_holds_the_test_binary() {
        let exe = env::current_exe().unwrap();
        assert_eq!(executable_dir().unwrap(), exe.parent().unwrap());
    }
}
