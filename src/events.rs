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

use crate::scripting::ScriptInvoker;
use anyhow::Result;
use calloop::channel::{self, Channel};
use calloop::signals::{Signal, Signals};
use calloop::{EventLoop, LoopSignal};
use std::sync::Arc;
use std::time::Duration;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ServiceEvent {
    Teardown,
}

/// Whatever keeps us reachable on the bus. Dropped from the loop
/// exactly once, on teardown.
pub trait BusRegistration {
    fn unregister(&mut self) -> Result<()>;
}

struct LoopData<R> {
    registration: Option<R>,
    signal: LoopSignal,
}

impl<R: BusRegistration> LoopData<R> {
    fn shutdown(&mut self) {
        if let Some(mut registration) = self.registration.take() {
            match registration.unregister() {
                Ok(_) => info!("Unregistered from the session bus"),
                Err(e) => warn!("Failed to unregister from the session bus: {}", e),
            }
        }
        self.signal.stop();
    }
}

/// The main loop. Blocks until a teardown is requested over the bus
/// or we get SIGINT/SIGTERM.
pub struct ServiceEventLoop<R: 'static> {
    event_loop: EventLoop<'static, LoopData<R>>,
}

impl<R: BusRegistration + 'static> ServiceEventLoop<R> {
    pub fn new() -> Result<Self> {
        Ok(Self {
            event_loop: EventLoop::try_new()?,
        })
    }

    pub fn watch_events(&self, events: Channel<ServiceEvent>) -> Result<()> {
        self.event_loop
            .handle()
            .insert_source(events, |event, _, data| match event {
                channel::Event::Msg(event) => {
                    debug!("Received event: {}", event);
                    match event {
                        ServiceEvent::Teardown => data.shutdown(),
                    }
                }
                // Nobody left to ask us to stop
                channel::Event::Closed => data.shutdown(),
            })
            .map_err(|e| anyhow!("Failed to watch service events: {}", e.error))?;
        Ok(())
    }

    /// Must be called before any other thread is spawned, so they all
    /// inherit the blocked signal mask.
    pub fn watch_signals(&self, invoker: Arc<ScriptInvoker>) -> Result<()> {
        let signals = Signals::new(&[Signal::SIGINT, Signal::SIGTERM])?;
        self.event_loop
            .handle()
            .insert_source(signals, move |event, _, data| {
                warn!("Caught {:?}, tearing down", event.signal());
                if let Err(e) = invoker.unload_script() {
                    debug!("Ignoring failed unload: {}", e);
                }
                data.shutdown();
            })
            .map_err(|e| anyhow!("Failed to watch signals: {}", e.error))?;
        Ok(())
    }

    pub fn run(mut self, registration: R) -> Result<()> {
        let mut data = LoopData {
            registration: Some(registration),
            signal: self.event_loop.get_signal(),
        };

        let res = self.event_loop.run(None::<Duration>, &mut data, |_| {});
        // Make sure we're off the bus even if the loop broke
        data.shutdown();

        res.map_err(|e| anyhow!("Event loop failed: {}", e))
    }
}
