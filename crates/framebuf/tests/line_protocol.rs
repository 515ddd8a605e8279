#![allow(missing_docs)]

mod common;

use framebuf::{CRLF, Frame, Framer, FramerOptions, TermSpec, Terminator, chunk_utils};

use crate::common::{REQUEST_READS, request_bytes};

/// What a connection driver expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Header,
    Body(usize),
}

#[derive(Debug, Default, PartialEq)]
struct Request {
    head: Vec<String>,
    body: Vec<u8>,
}

/// A minimal HTTP/1.1 request reader driving a `Framer` the way an event loop
/// would: arm, feed each read, and handle at most one frame per step.
struct Driver {
    framer: Framer,
    expect: Expect,
    current: Request,
    done: Vec<Request>,
}

impl Driver {
    fn new(capacity: usize) -> Self {
        let mut framer = Framer::with_options(FramerOptions {
            initial_capacity: capacity,
        })
        .unwrap();
        framer.arm(Terminator::crlf());
        Self {
            framer,
            expect: Expect::Header,
            current: Request::default(),
            done: Vec::new(),
        }
    }

    fn on_read(&mut self, bytes: &[u8]) {
        let mut frame = self.framer.feed(bytes).unwrap();
        while let Some(f) = frame {
            self.on_frame(&f);
            frame = self.framer.check();
        }
    }

    fn on_frame(&mut self, frame: &Frame) {
        match self.expect {
            Expect::Header if frame == CRLF => {
                let len = self
                    .current
                    .head
                    .iter()
                    .find_map(|line| line.strip_prefix("Content-Length: "))
                    .map_or(0, |n| n.parse().unwrap());
                if len == 0 {
                    self.finish();
                } else {
                    self.expect = Expect::Body(len);
                    self.framer.set_term(len).unwrap();
                }
            }
            Expect::Header => {
                let line = frame.strip_suffix(CRLF).unwrap();
                self.current
                    .head
                    .push(String::from_utf8(line.to_vec()).unwrap());
                self.framer.arm(Terminator::crlf());
            }
            Expect::Body(len) => {
                assert_eq!(frame.len(), len);
                self.current.body = frame.to_vec();
                self.finish();
            }
        }
    }

    fn finish(&mut self) {
        self.done.push(std::mem::take(&mut self.current));
        self.expect = Expect::Header;
        self.framer.arm(Terminator::crlf());
    }
}

fn expected_requests() -> Vec<Request> {
    vec![
        Request {
            head: vec![
                "POST /submit HTTP/1.1".into(),
                "Host: example.org".into(),
                "Content-Length: 11".into(),
            ],
            body: b"hello world".to_vec(),
        },
        Request {
            head: vec!["GET / HTTP/1.1".into()],
            body: Vec::new(),
        },
    ]
}

#[test]
fn reads_requests_from_socket_reads() {
    let mut driver = Driver::new(16);
    for read in REQUEST_READS {
        driver.on_read(read);
    }
    assert_eq!(driver.done, expected_requests());
    assert!(driver.framer.is_empty());
    assert_eq!(driver.framer.terminator(), &Terminator::crlf());
}

#[test]
fn reads_requests_one_byte_at_a_time() {
    let mut driver = Driver::new(1);
    for byte in request_bytes() {
        driver.on_read(&[byte]);
    }
    assert_eq!(driver.done, expected_requests());
}

#[test]
fn reads_requests_in_one_read() {
    let mut driver = Driver::new(4096);
    driver.on_read(&request_bytes());
    assert_eq!(driver.done, expected_requests());
    assert_eq!(driver.framer.capacity(), 4096);
}

#[test]
fn reads_requests_in_even_chunks() {
    let payload = request_bytes();
    for parts in 1..=payload.len() {
        let mut driver = Driver::new(8);
        for chunk in chunk_utils::produce_chunks(&payload, parts) {
            driver.on_read(chunk);
        }
        assert_eq!(driver.done, expected_requests(), "{parts} parts");
    }
}

#[test]
fn drain_on_idle_with_any() {
    let mut framer = Framer::new(8).unwrap();
    framer.set_term(b"\r\n").unwrap();
    assert_eq!(framer.feed(b"no newline yet").unwrap(), None);

    // The connection went idle; take whatever arrived.
    framer.set_term(TermSpec::Any).unwrap();
    assert_eq!(framer.check().unwrap(), "no newline yet");
    assert_eq!(framer.check(), None);
}
