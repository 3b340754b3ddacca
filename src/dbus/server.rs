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

//! The object KWin scripts and users talk to.

use super::{SCRIPTING_BUS_NAME, SERVICE_BUS_NAME, SERVICE_PATH};
use crate::events::BusRegistration;
use crate::service::WindowRestore;
use anyhow::Result;
use zbus::blocking::{Connection, ConnectionBuilder};
use zbus::{dbus_interface, fdo};

struct ScriptHandler {
    service: WindowRestore,
}

// Methods take &mut self so the object server never runs two of
// them at once.
#[dbus_interface(name = "org.kde.kwin.Script")]
impl ScriptHandler {
    fn trigger_restore(&mut self) -> fdo::Result<()> {
        trace!("TriggerRestore()");
        Ok(self.service.trigger_restore()?)
    }

    fn restore(&mut self) -> fdo::Result<String> {
        trace!("Restore()");
        Ok(self.service.restore()?)
    }

    fn trigger_save(&mut self) -> fdo::Result<()> {
        trace!("TriggerSave()");
        Ok(self.service.trigger_save()?)
    }

    fn save(&mut self, data: String) -> fdo::Result<()> {
        trace!("Save({} bytes)", data.len());
        Ok(self.service.save(&data)?)
    }

    fn unload_service_script(&mut self) -> fdo::Result<()> {
        trace!("UnloadServiceScript()");
        Ok(self.service.unload_service_script()?)
    }

    // Removing ourselves from the object server while inside one of our
    // own methods would deadlock, the main loop does that part.
    fn teardown(&mut self) {
        trace!("Teardown()");
        self.service.teardown();
    }
}

/// Our registration on the session bus
pub struct Server {
    connection: Connection,
}

impl Server {
    pub fn new(service: WindowRestore) -> Result<Self> {
        let connection = ConnectionBuilder::session()?
            .name(SERVICE_BUS_NAME)?
            .name(SCRIPTING_BUS_NAME)?
            .serve_at(SERVICE_PATH, ScriptHandler { service })?
            .build()
            .map_err(|e| anyhow!("Failed to register {} on the session bus: {}", SERVICE_BUS_NAME, e))?;

        info!("DBUS: serving {} at {}", SERVICE_BUS_NAME, SERVICE_PATH);
        Ok(Self { connection })
    }
}

impl BusRegistration for Server {
    fn unregister(&mut self) -> Result<()> {
        self.connection
            .object_server()
            .remove::<ScriptHandler, _>(SERVICE_PATH)?;

        for name in [SERVICE_BUS_NAME, SCRIPTING_BUS_NAME] {
            if !self.connection.release_name(name)? {
                debug!("{} was not ours to release", name);
            }
        }
        Ok(())
    }
}
