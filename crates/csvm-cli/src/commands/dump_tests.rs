use std::io::{self, Write};

use super::dump::{ignore_broken_pipe, write_listing};

/// Accepts `room` bytes, then behaves like a pipe whose reader went away.
struct ClosingPipe {
    room: usize,
    kind: io::ErrorKind,
    written: Vec<u8>,
}

impl ClosingPipe {
    fn new(room: usize, kind: io::ErrorKind) -> Self {
        Self {
            room,
            kind,
            written: Vec::new(),
        }
    }
}

impl Write for ClosingPipe {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.room == 0 {
            return Err(self.kind.into());
        }
        let n = buf.len().min(self.room);
        self.written.extend_from_slice(&buf[..n]);
        self.room -= n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn writes_whole_listing() {
    let mut out = Vec::new();
    write_listing(&mut out, "[code]\n  0000 00 halt\n").unwrap();
    assert_eq!(out, b"[code]\n  0000 00 halt\n");
}

#[test]
fn closed_pipe_is_not_an_error() {
    let mut out = ClosingPipe::new(7, io::ErrorKind::BrokenPipe);

    let written = write_listing(&mut out, "[code]\n  0000 00 halt\n");

    assert_eq!(written.as_ref().unwrap_err().kind(), io::ErrorKind::BrokenPipe);
    assert!(ignore_broken_pipe(written).is_ok());
    assert_eq!(out.written, b"[code]\n");
}

#[test]
fn other_write_errors_are_reported() {
    let mut out = ClosingPipe::new(0, io::ErrorKind::PermissionDenied);

    let err = ignore_broken_pipe(write_listing(&mut out, "[code]\n")).unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
}
