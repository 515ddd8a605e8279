#![allow(missing_docs)]
#![allow(dead_code)]

/// An HTTP/1.1 request with a sized body, as it might arrive in socket reads.
pub const REQUEST_READS: [&[u8]; 6] = [
    b"POST /submit HT",
    b"TP/1.1\r\nHost: example.org\r",
    b"\nContent-Length: 11\r\n",
    b"\r\nhello",
    b" world",
    b"GET / HTTP/1.1\r\n\r\n",
];

/// `REQUEST_READS` concatenated.
pub fn request_bytes() -> Vec<u8> {
    REQUEST_READS.concat()
}
