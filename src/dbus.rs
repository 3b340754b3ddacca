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

// Names on the session bus. All of these are dictated by KWin, the
// scripts call us back using exactly these.

pub mod kwin;
pub mod server;

/// Script plugin name, also the last component of our bus name
pub const SERVICE_NAME: &str = "WindowRestore";
pub const SERVICE_BUS_NAME: &str = "org.kde.KWin.Script.WindowRestore";
pub const SERVICE_PATH: &str = "/WindowRestore";

pub const KWIN_BUS_NAME: &str = "org.kde.KWin";
/// We claim this one as well, next to our own name
pub const SCRIPTING_BUS_NAME: &str = "org.kde.KWin.Scripting";
pub const SCRIPTING_PATH: &str = "/Scripting";
pub const SCRIPTING_INTERFACE: &str = "org.kde.kwin.Scripting";
/// Interface of a loaded KWin script, and the one we serve
pub const SCRIPT_INTERFACE: &str = "org.kde.kwin.Script";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_name_ends_with_service_name() {
        assert_eq!(SERVICE_BUS_NAME, format!("{}.Script.{}", KWIN_BUS_NAME, SERVICE_NAME));
        assert_eq!(SERVICE_PATH, format!("/{}", SERVICE_NAME));
    }
}
