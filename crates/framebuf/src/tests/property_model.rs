use alloc::vec::Vec;

use quickcheck::{Arbitrary, Gen, QuickCheck};

use crate::{Frame, Framer, MAX_PATTERN_LEN, TermSpec};

#[derive(Debug, Clone)]
enum Op {
    Feed(Vec<u8>),
    Check,
    Pop,
    SetPattern(Vec<u8>),
    SetLength(i64),
    SetAny,
    ClearTerm,
}

/// Bytes over a tiny alphabet so patterns actually occur.
fn small_bytes(g: &mut Gen, max: usize) -> Vec<u8> {
    let len = usize::arbitrary(g) % (max + 1);
    (0..len).map(|_| b"ab\r\n"[usize::arbitrary(g) % 4]).collect()
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 10 {
            0..=3 => Op::Feed(small_bytes(g, 24)),
            4 => Op::Check,
            5 => Op::Pop,
            // Occasionally longer than the pattern limit.
            6 => Op::SetPattern(small_bytes(g, MAX_PATTERN_LEN + 4)),
            7 => Op::SetLength(i64::from(i8::arbitrary(g))),
            8 => Op::SetAny,
            _ => Op::ClearTerm,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ModelTerm {
    Unset,
    Pattern(Vec<u8>),
    Length(usize),
    Any,
}

/// Reference behaviour: a plain `Vec` and a naive scan.
struct Model {
    buf: Vec<u8>,
    term: ModelTerm,
}

impl Model {
    fn frame_len(&self) -> Option<usize> {
        match &self.term {
            ModelTerm::Unset => None,
            ModelTerm::Pattern(p) => self
                .buf
                .windows(p.len())
                .position(|w| w == p.as_slice())
                .map(|at| at + p.len()),
            ModelTerm::Length(n) => (self.buf.len() >= *n).then_some(*n),
            ModelTerm::Any => (!self.buf.is_empty()).then_some(self.buf.len()),
        }
    }

    fn check(&mut self) -> Option<Vec<u8>> {
        let len = self.frame_len()?;
        self.term = ModelTerm::Unset;
        Some(self.buf.drain(..len).collect())
    }

    /// Returns whether the terminator was accepted.
    fn set(&mut self, term: ModelTerm) -> bool {
        let valid = match &term {
            ModelTerm::Pattern(p) => !p.is_empty() && p.len() <= MAX_PATTERN_LEN,
            _ => true,
        };
        if valid {
            self.term = term;
        }
        valid
    }
}

/// Property: any sequence of operations produces the same frames and leaves
/// the same buffered bytes as the naive model.
#[test]
fn framer_matches_model_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(ops: Vec<Op>, capacity: u8) -> bool {
        let mut framer = Framer::new(usize::from(capacity % 16)).unwrap();
        let mut model = Model {
            buf: Vec::new(),
            term: ModelTerm::Unset,
        };

        for op in ops {
            let agrees = match op {
                Op::Feed(bytes) => {
                    let got = framer.feed(&bytes).unwrap().map(Frame::into_vec);
                    model.buf.extend_from_slice(&bytes);
                    got == model.check()
                }
                Op::Check => framer.check().map(Frame::into_vec) == model.check(),
                Op::Pop => {
                    let expected = (!model.buf.is_empty()).then(|| core::mem::take(&mut model.buf));
                    framer.pop().map(Frame::into_vec) == expected
                }
                Op::SetPattern(p) => {
                    let accepted = framer.set_term(p.as_slice()).is_ok();
                    accepted == model.set(ModelTerm::Pattern(p))
                }
                Op::SetLength(n) => {
                    let accepted = framer.set_term(n).is_ok();
                    let modeled = match usize::try_from(n) {
                        Ok(len) => model.set(ModelTerm::Length(len)),
                        Err(_) => false,
                    };
                    accepted == modeled
                }
                Op::SetAny => {
                    framer.set_term(TermSpec::Any).unwrap();
                    model.set(ModelTerm::Any)
                }
                Op::ClearTerm => {
                    framer.clear_term();
                    model.set(ModelTerm::Unset)
                }
            };
            if !agrees || framer.buffered() != model.buf.as_slice() {
                return false;
            }
        }
        true
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 5_000 } else { 500 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Vec<Op>, u8) -> bool);
}
