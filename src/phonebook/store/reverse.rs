//! Reading a file's lines from last to first.
//!
//! The reader pulls fixed-size chunks from the end of the stream, so finding
//! the last few lines of a large file touches only its tail. Memory use is
//! bounded by the chunk size plus the longest line returned.
//!
//! A single trailing newline does not produce an empty final line, matching
//! `str::lines`. Carriage returns before a newline are stripped.

use std::io::{self, Read, Seek, SeekFrom};

pub const DEFAULT_CHUNK_SIZE: usize = 4096;

pub struct ReverseLines<R> {
    reader: R,
    /// Stream offset of the first byte held in `tail`.
    pos: u64,
    /// Bytes read but not yet returned, in file order.
    tail: Vec<u8>,
    chunk_size: usize,
    started: bool,
    done: bool,
}

impl<R: Read + Seek> ReverseLines<R> {
    pub fn new(reader: R) -> io::Result<Self> {
        Self::with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(mut reader: R, chunk_size: usize) -> io::Result<Self> {
        let end = reader.seek(SeekFrom::End(0))?;
        Ok(Self {
            reader,
            pos: end,
            tail: Vec::new(),
            chunk_size: chunk_size.max(1),
            started: false,
            done: end == 0,
        })
    }

    /// Returns the raw bytes of the previous line, or `None` at the start.
    pub fn next_line_bytes(&mut self) -> io::Result<Option<Vec<u8>>> {
        if self.done {
            return Ok(None);
        }

        if !self.started {
            self.started = true;
            self.fill()?;
            if self.tail.last() == Some(&b'\n') {
                self.tail.pop();
            }
        }

        loop {
            if let Some(i) = self.tail.iter().rposition(|b| *b == b'\n') {
                let line = self.tail.split_off(i + 1);
                self.tail.pop();
                return Ok(Some(strip_cr(line)));
            }

            if self.pos == 0 {
                self.done = true;
                return Ok(Some(strip_cr(std::mem::take(&mut self.tail))));
            }

            self.fill()?;
        }
    }

    /// Reads the chunk just before `pos` and prepends it to `tail`.
    fn fill(&mut self) -> io::Result<()> {
        let n = (self.chunk_size as u64).min(self.pos);
        if n == 0 {
            return Ok(());
        }
        self.pos -= n;
        self.reader.seek(SeekFrom::Start(self.pos))?;

        let mut chunk = vec![0u8; n as usize];
        self.reader.read_exact(&mut chunk)?;
        chunk.extend_from_slice(&self.tail);
        self.tail = chunk;
        Ok(())
    }
}

impl<R: Read + Seek> Iterator for ReverseLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_line_bytes() {
            Ok(Some(bytes)) => Some(Ok(String::from_utf8_lossy(&bytes).into_owned())),
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn strip_cr(mut line: Vec<u8>) -> Vec<u8> {
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    line
}
