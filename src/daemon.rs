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

//! Wires the pieces together and runs until torn down.

use crate::config::{self, Config};
use crate::dbus::kwin::KWinScripting;
use crate::dbus::server::Server;
use crate::dbus::SERVICE_NAME;
use crate::events::{BusRegistration, ServiceEvent, ServiceEventLoop};
use crate::scripting::ScriptInvoker;
use crate::service::WindowRestore;
use crate::store::SnapshotStore;
use anyhow::Result;
use calloop::channel::{channel, Sender};
use std::sync::Arc;

pub fn run(config: &Config) -> Result<()> {
    let data_file = config.data_file()?;
    let scripts = config.scripts()?;
    config::check_scripts(&scripts);
    info!("Window data lives in {}", data_file.display());

    let kwin = KWinScripting::connect(config.call_timeout())?;
    let invoker = Arc::new(ScriptInvoker::new(Box::new(kwin), SERVICE_NAME));

    let service_invoker = invoker.clone();
    serve(invoker, true, move |events| {
        let store = SnapshotStore::new(data_file);
        Server::new(WindowRestore::new(store, scripts, service_invoker, events))
    })
}

/// Set up the loop, register on the bus through `register` and run
/// until torn down. Any failure along the way gets a best-effort unload
/// of our script before the error is returned.
///
/// Catching signals blocks them for the calling thread and every thread
/// it spawns later, so `register` must be what spawns the bus threads.
pub fn serve<R, F>(invoker: Arc<ScriptInvoker>, catch_signals: bool, register: F) -> Result<()>
where
    R: BusRegistration + 'static,
    F: FnOnce(Sender<ServiceEvent>) -> Result<R>,
{
    match setup_and_run(&invoker, catch_signals, register) {
        Ok(_) => {
            info!("Bye");
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            best_effort_unload(&invoker);
            Err(e)
        }
    }
}

fn setup_and_run<R, F>(invoker: &Arc<ScriptInvoker>, catch_signals: bool, register: F) -> Result<()>
where
    R: BusRegistration + 'static,
    F: FnOnce(Sender<ServiceEvent>) -> Result<R>,
{
    let service_loop = ServiceEventLoop::<R>::new()?;
    if catch_signals {
        service_loop.watch_signals(invoker.clone())?;
    }

    let (tx, rx) = channel::<ServiceEvent>();
    service_loop.watch_events(rx)?;

    let registration = register(tx)?;
    info!("Ready");
    service_loop.run(registration)
}

// Whatever goes wrong here has to stay quiet, we're already failing
fn best_effort_unload(invoker: &ScriptInvoker) {
    if let Err(e) = invoker.unload_script() {
        debug!("Ignoring failed unload: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripting::fake::FakeHost;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRegistration(Arc<AtomicUsize>);

    impl BusRegistration for CountingRegistration {
        fn unregister(&mut self) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn invoker(host: &Arc<FakeHost>) -> Arc<ScriptInvoker> {
        Arc::new(ScriptInvoker::new(Box::new(host.clone()), SERVICE_NAME))
    }

    #[test]
    fn failed_registration_unloads_our_script() {
        let host = FakeHost::new();
        let invoker = invoker(&host);
        invoker.run_script(Path::new("/s/kwin_restore.js")).unwrap();

        let res = serve(invoker, false, |_| -> Result<CountingRegistration> {
            bail!("org.kde.KWin.Script.WindowRestore is already owned")
        });

        assert_eq!(res.unwrap_err().to_string(), "org.kde.KWin.Script.WindowRestore is already owned");
        assert!(host.state.lock().loaded.is_empty());
    }

    #[test]
    fn failed_unload_does_not_hide_the_setup_error() {
        let host = FakeHost::unreachable();

        let res = serve(invoker(&host), false, |_| -> Result<CountingRegistration> {
            bail!("no session bus")
        });

        assert_eq!(res.unwrap_err().to_string(), "no session bus");
    }

    #[test]
    fn teardown_after_registering() {
        let host = FakeHost::new();
        let unregistered = Arc::new(AtomicUsize::new(0));

        let counter = unregistered.clone();
        serve(invoker(&host), false, move |events| {
            events.send(ServiceEvent::Teardown).unwrap();
            Ok(CountingRegistration(counter))
        })
        .unwrap();

        assert_eq!(unregistered.load(Ordering::SeqCst), 1);
    }
}
