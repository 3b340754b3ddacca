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

use crate::error::Result;
use crate::events::ServiceEvent;
use crate::scripting::{ScriptInvoker, ScriptKind, Scripts};
use crate::store::SnapshotStore;
use calloop::channel::Sender;
use parking_lot::Mutex;
use std::sync::Arc;

/// What the bus object actually does.
///
/// The Trigger* calls are for users (keybindings, session hooks). They
/// start a KWin script, which then calls Save or Restore on us to hand
/// over the window data, and finally UnloadServiceScript.
pub struct WindowRestore {
    store: SnapshotStore,
    scripts: Scripts,
    invoker: Arc<ScriptInvoker>,
    events: Mutex<Sender<ServiceEvent>>,
}

impl WindowRestore {
    pub fn new(
        store: SnapshotStore,
        scripts: Scripts,
        invoker: Arc<ScriptInvoker>,
        events: Sender<ServiceEvent>,
    ) -> Self {
        Self {
            store,
            scripts,
            invoker,
            events: Mutex::new(events),
        }
    }

    pub fn trigger(&self, kind: ScriptKind) -> Result<()> {
        info!("Triggering {}", kind);
        self.invoker.run_script(self.scripts.path(kind))
    }

    pub fn trigger_restore(&self) -> Result<()> {
        self.trigger(ScriptKind::Restore)
    }

    pub fn trigger_save(&self) -> Result<()> {
        self.trigger(ScriptKind::Save)
    }

    /// Called by the restore script
    pub fn restore(&self) -> Result<String> {
        let data = self.store.load()?;
        debug!("Handing {} bytes of window data to the restore script", data.len());
        Ok(data)
    }

    /// Called by the save script
    pub fn save(&self, data: &str) -> Result<()> {
        self.store.store(data)?;
        info!("Saved window data to {}", self.store.path().display());
        Ok(())
    }

    pub fn unload_service_script(&self) -> Result<()> {
        self.invoker.unload_script()
    }

    /// Never fails. An unload error is logged and the loop is told to
    /// stop regardless.
    pub fn teardown(&self) {
        info!("Tearing down");
        if let Err(e) = self.unload_service_script() {
            warn!("Ignoring failed unload during teardown: {}", e);
        }

        match self.events.lock().send(ServiceEvent::Teardown) {
            Ok(_) => {}
            Err(e) => warn!("Event loop is already gone: {}", e),
        }
    }
}
