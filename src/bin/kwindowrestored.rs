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

use anyhow::Result;
use kwindowrestore::config::Config;
use kwindowrestore::daemon;
use log::{error, info};
use std::io::Write;

fn main() -> Result<()> {
    setup_logging();

    let config = match Config::load(None) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return Err(e);
        }
    };

    info!("KWindowRestore {} starting", env!("CARGO_PKG_VERSION"));
    daemon::run(&config)
}

fn setup_logging() {
    if ::std::env::var_os("RUST_LOG").is_none() {
        #[cfg(debug_assertions)]
        ::std::env::set_var("RUST_LOG", "trace");
        #[cfg(not(debug_assertions))]
        ::std::env::set_var("RUST_LOG", "info");
    }

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());

            writeln!(
                buf,
                "{} [{}] {}",
                chrono::Local::now().format("%F %T%.3f"),
                style.value(record.level()),
                record.args()
            )
        })
        .init();
}
