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

use super::{KWIN_BUS_NAME, SCRIPTING_INTERFACE, SCRIPTING_PATH, SCRIPT_INTERFACE};
use crate::error::{Error, Result};
use crate::scripting::ScriptHost;
use ::dbus::blocking::Connection;
use parking_lot::Mutex;
use std::path::Path;
use std::time::Duration;

/// Client for KWin's /Scripting object.
///
/// This uses its own session bus connection, separate from the one our
/// service is served on, so calls made from inside a method handler
/// don't wait on the connection that is busy dispatching them.
pub struct KWinScripting {
    conn: Mutex<Connection>,
    timeout: Duration,
}

impl KWinScripting {
    pub fn connect(timeout: Duration) -> anyhow::Result<Self> {
        // Requires DBUS_SESSION_BUS_ADDRESS to be set
        let conn = match Connection::new_session() {
            Ok(c) => c,
            Err(e) => {
                bail!("Failed to connect to DBUS session bus, is DBUS_SESSION_BUS_ADDRESS set?: {}", e);
            }
        };
        debug!("DBUS: connected to session bus as {}", conn.unique_name());

        Ok(Self {
            conn: Mutex::new(conn),
            timeout,
        })
    }
}

impl ScriptHost for KWinScripting {
    fn load_script(&self, path: &Path, name: &str) -> Result<i32> {
        let path = path.to_str().ok_or_else(|| {
            Error::invocation(format!("script path {} is not valid UTF-8", path.display()))
        })?;

        let conn = self.conn.lock();
        let proxy = conn.with_proxy(KWIN_BUS_NAME, SCRIPTING_PATH, self.timeout);
        let (id,): (i32,) = proxy.method_call(SCRIPTING_INTERFACE, "loadScript", (path, name))?;
        trace!("loadScript({}, {}) -> {}", path, name, id);
        Ok(id)
    }

    fn run_script(&self, id: i32) -> Result<()> {
        let conn = self.conn.lock();
        let proxy = conn.with_proxy(KWIN_BUS_NAME, format!("/{}", id), self.timeout);
        let _: () = proxy.method_call(SCRIPT_INTERFACE, "run", ())?;
        Ok(())
    }

    fn unload_script(&self, name: &str) -> Result<bool> {
        let conn = self.conn.lock();
        let proxy = conn.with_proxy(KWIN_BUS_NAME, SCRIPTING_PATH, self.timeout);
        let (unloaded,): (bool,) = proxy.method_call(SCRIPTING_INTERFACE, "unloadScript", (name,))?;
        trace!("unloadScript({}) -> {}", name, unloaded);
        Ok(unloaded)
    }
}
