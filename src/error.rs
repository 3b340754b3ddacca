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

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use zbus::fdo;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to whoever called us over the bus.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no saved window data at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("window manager call failed: {0}")]
    Invocation(String),
}

impl Error {
    /// Classify a filesystem error on `path`. A missing file is its own case.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Error::NotFound { path },
            _ => Error::Io { path, source },
        }
    }

    pub fn invocation(msg: impl Into<String>) -> Self {
        Error::Invocation(msg.into())
    }
}

impl From<::dbus::Error> for Error {
    fn from(e: ::dbus::Error) -> Self {
        let name = e.name().unwrap_or("unknown error").to_string();
        match e.message() {
            Some(msg) => Error::Invocation(format!("{}: {}", name, msg)),
            None => Error::Invocation(name),
        }
    }
}

impl From<Error> for fdo::Error {
    fn from(e: Error) -> Self {
        match &e {
            Error::NotFound { .. } => fdo::Error::FileNotFound(e.to_string()),
            Error::Io { .. } => fdo::Error::IOError(e.to_string()),
            Error::Invocation(_) => fdo::Error::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let err = Error::from_io("/nope", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn other_io_errors_stay_io() {
        let err = Error::from_io("/nope", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn bus_error_names() {
        let not_found: fdo::Error = Error::NotFound { path: "/x".into() }.into();
        assert!(matches!(not_found, fdo::Error::FileNotFound(_)));

        let io: fdo::Error = Error::from_io("/x", io::Error::from(io::ErrorKind::Other)).into();
        assert!(matches!(io, fdo::Error::IOError(_)));

        let failed: fdo::Error = Error::invocation("kwin is gone").into();
        match failed {
            fdo::Error::Failed(msg) => assert!(msg.contains("kwin is gone")),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
