#![no_main]

use arbitrary::Arbitrary;
use framebuf::{Frame, Framer, MAX_PATTERN_LEN, TermSpec};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Feed(Vec<u8>),
    Check,
    Pop,
    SetPattern(Vec<u8>),
    SetLength(i16),
    SetAny,
    ClearTerm,
}

#[derive(Arbitrary, Debug)]
struct Input {
    capacity: u8,
    ops: Vec<Op>,
}

#[derive(Debug, Clone, PartialEq)]
enum Term {
    Unset,
    Pattern(Vec<u8>),
    Length(usize),
    Any,
}

/// Naive reference: the buffer is a `Vec` and matching is a linear scan.
fn frame_len(buf: &[u8], term: &Term) -> Option<usize> {
    match term {
        Term::Unset => None,
        Term::Pattern(p) => buf
            .windows(p.len())
            .position(|w| w == p.as_slice())
            .map(|at| at + p.len()),
        Term::Length(n) => (buf.len() >= *n).then_some(*n),
        Term::Any => (!buf.is_empty()).then_some(buf.len()),
    }
}

fn check(buf: &mut Vec<u8>, term: &mut Term) -> Option<Vec<u8>> {
    let len = frame_len(buf, term)?;
    *term = Term::Unset;
    Some(buf.drain(..len).collect())
}

fn run(input: Input) {
    let Ok(mut framer) = Framer::new(usize::from(input.capacity)) else {
        return;
    };
    let mut buf = Vec::new();
    let mut term = Term::Unset;

    for op in input.ops {
        match op {
            Op::Feed(bytes) => {
                let got = framer.feed(&bytes).unwrap().map(Frame::into_vec);
                buf.extend_from_slice(&bytes);
                assert_eq!(got, check(&mut buf, &mut term));
            }
            Op::Check => {
                assert_eq!(
                    framer.check().map(Frame::into_vec),
                    check(&mut buf, &mut term)
                );
            }
            Op::Pop => {
                let expected = (!buf.is_empty()).then(|| std::mem::take(&mut buf));
                assert_eq!(framer.pop().map(Frame::into_vec), expected);
            }
            Op::SetPattern(p) => {
                let valid = !p.is_empty() && p.len() <= MAX_PATTERN_LEN;
                assert_eq!(framer.set_term(p.as_slice()).is_ok(), valid);
                if valid {
                    term = Term::Pattern(p);
                }
            }
            Op::SetLength(n) => {
                assert_eq!(framer.set_term(i64::from(n)).is_ok(), n >= 0);
                if let Ok(n) = usize::try_from(n) {
                    term = Term::Length(n);
                }
            }
            Op::SetAny => {
                framer.set_term(TermSpec::Any).unwrap();
                term = Term::Any;
            }
            Op::ClearTerm => {
                framer.clear_term();
                term = Term::Unset;
            }
        }
        assert_eq!(framer.buffered(), buf.as_slice());
        assert_eq!(framer.len(), buf.len());
    }
}

fuzz_target!(|input: Input| run(input));
