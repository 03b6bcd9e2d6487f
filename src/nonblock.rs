//! Non-blocking reads on Unix descriptors.
//!
//! With `O_NONBLOCK` set, a read that has nothing to return fails with
//! `EAGAIN`/`EWOULDBLOCK` instead of waiting. [`ChunkReader`](crate::ChunkReader)
//! surfaces that as [`Error::WouldBlock`](crate::Error::WouldBlock).

use rustix::fs::{OFlags, fcntl_getfl, fcntl_setfl};
use std::fs::OpenOptions;
use std::io;
use std::os::fd::{AsFd, BorrowedFd};
use std::os::unix::fs::OpenOptionsExt;

/// Sets `O_NONBLOCK` on a descriptor and puts the previous flags back on drop.
///
/// The flag belongs to the open file description, so it is visible through
/// every duplicate of the descriptor until the guard is dropped.
#[derive(Debug)]
pub struct NonBlocking<'fd> {
    fd: BorrowedFd<'fd>,
    previous: OFlags,
}

impl<'fd> NonBlocking<'fd> {
    pub fn enable<F: AsFd + ?Sized>(fd: &'fd F) -> io::Result<Self> {
        let fd = fd.as_fd();
        let previous = fcntl_getfl(fd)?;
        fcntl_setfl(fd, previous | OFlags::NONBLOCK)?;
        log::debug!("O_NONBLOCK set (previous flags {previous:?})");
        Ok(NonBlocking { fd, previous })
    }

    /// Flags in effect before the guard was created.
    pub fn previous_flags(&self) -> OFlags {
        self.previous
    }
}

impl Drop for NonBlocking<'_> {
    fn drop(&mut self) {
        if let Err(e) = fcntl_setfl(self.fd, self.previous) {
            log::warn!("failed to restore descriptor flags: {e}");
        }
    }
}

pub fn is_nonblocking<F: AsFd>(fd: F) -> io::Result<bool> {
    Ok(fcntl_getfl(fd)?.contains(OFlags::NONBLOCK))
}

/// Read-only open options that also pass `O_NONBLOCK` to `open(2)`.
///
/// Opening a FIFO this way returns immediately even without a writer.
pub fn open_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options
        .read(true)
        .custom_flags(OFlags::NONBLOCK.bits() as i32);
    options
}
