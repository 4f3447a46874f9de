#[cfg(test)]
mod growable_buffer_tests {
    use std::io::{self, Read, Write};

    use codec_core::buffer::GrowableBuffer;
    use codec_core::constants::MAX_READ_WINDOW;

    /// Source that yields one byte per read.
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos == self.data.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    /// Source that alternates between "nothing yet" and a short chunk.
    struct Stutter {
        chunks: Vec<io::Result<Vec<u8>>>,
    }

    impl Read for Stutter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.chunks.is_empty() {
                return Ok(0);
            }
            match self.chunks.remove(0) {
                Ok(chunk) => {
                    buf[..chunk.len()].copy_from_slice(&chunk);
                    Ok(chunk.len())
                }
                Err(e) => Err(e),
            }
        }
    }

    fn would_block() -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::WouldBlock, "not yet"))
    }

    #[test]
    fn append_in_place_while_spare_capacity_lasts() {
        let mut buf = GrowableBuffer::new(16);
        buf.extend_from_slice(b"abcd");
        let cap = buf.capacity();
        assert!(cap >= 4 + 16);

        buf.extend_from_slice(b"efgh");
        assert_eq!(buf.capacity(), cap);
        assert_eq!(buf.reallocations(), 1);
        assert_eq!(buf.as_slice(), b"abcdefgh");
    }

    #[test]
    fn overflowing_write_grows_by_request_plus_increment() {
        let mut buf = GrowableBuffer::new(16);
        buf.extend_from_slice(&[1u8; 10]);
        let before = buf.len();
        let big = [2u8; 100];
        buf.extend_from_slice(&big);

        assert_eq!(buf.reallocations(), 2);
        assert!(buf.capacity() >= before + big.len() + 16);
        assert_eq!(&buf.as_slice()[..10], &[1u8; 10]);
        assert_eq!(&buf.as_slice()[10..], &big[..]);
    }

    #[test]
    fn byte_at_a_time_source_reallocates_rarely() {
        let data: Vec<u8> = (0..10_000).map(|i| (i % 256) as u8).collect();
        let mut src = Trickle { data: data.clone(), pos: 0 };
        let mut buf = GrowableBuffer::new(1024);

        let n = buf.read_from(&mut src).unwrap();
        assert_eq!(n, data.len());
        assert_eq!(buf.as_slice(), &data[..]);
        assert!(buf.reallocations() <= data.len() / 1024 + 1, "got {}", buf.reallocations());
    }

    #[test]
    fn would_block_is_retried_with_backoff() {
        let mut src = Stutter {
            chunks: vec![would_block(), would_block(), Ok(b"ab".to_vec()), would_block(), Ok(b"cd".to_vec())],
        };
        let mut buf = GrowableBuffer::new(8);
        assert_eq!(buf.read_from(&mut src).unwrap(), 4);
        assert_eq!(buf.as_slice(), b"abcd");
    }

    #[test]
    fn interrupted_is_retried() {
        let mut src = Stutter {
            chunks: vec![Err(io::Error::new(io::ErrorKind::Interrupted, "signal")), Ok(b"xyz".to_vec())],
        };
        let mut buf = GrowableBuffer::new(8);
        assert_eq!(buf.read_from(&mut src).unwrap(), 3);
    }

    #[test]
    fn hard_error_is_returned() {
        let mut src = Stutter {
            chunks: vec![Ok(b"partial".to_vec()), Err(io::Error::new(io::ErrorKind::InvalidData, "bad block"))],
        };
        let mut buf = GrowableBuffer::new(8);
        let err = buf.read_from(&mut src).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn take_hands_over_contents_and_empties() {
        let mut buf = GrowableBuffer::new(8);
        buf.write_all(b"payload").unwrap();
        let out = buf.take();
        assert_eq!(&out[..], b"payload");
        assert!(buf.is_empty());

        buf.write_all(b"again").unwrap();
        assert_eq!(buf.as_slice(), b"again");
        assert_eq!(&out[..], b"payload");
    }

    #[test]
    fn small_take_does_not_carry_the_growth_increment() {
        let growth = 2 * 1024 * 1024;
        let mut buf = GrowableBuffer::new(growth);
        let mut outputs = Vec::new();
        for _ in 0..100 {
            buf.read_from(&mut &b"eleven byte"[..]).unwrap();
            outputs.push(buf.take());
        }
        assert!(outputs.iter().all(|o| &o[..] == b"eleven byte"));
        // one allocation serves every record
        assert_eq!(buf.reallocations(), 1);
        assert!(buf.capacity() >= growth - 100 * 11);
    }

    /// Fills every window it is offered with a marker but only claims one byte.
    struct Scribbler {
        windows: Vec<usize>,
        saw_marker: bool,
    }

    impl Read for Scribbler {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.windows.push(buf.len());
            if self.windows.len() == 1 {
                buf.fill(0xAA);
                return Ok(1);
            }
            self.saw_marker = buf.len() > 1 && buf[..buf.len() - 1].iter().all(|&b| b == 0xAA);
            Ok(0)
        }
    }

    #[test]
    fn read_window_is_bounded_and_zeroed_once() {
        let mut buf = GrowableBuffer::new(2 * 1024 * 1024);
        let mut src = Scribbler { windows: Vec::new(), saw_marker: false };
        assert_eq!(buf.read_from(&mut src).unwrap(), 1);
        assert!(src.windows.iter().all(|&w| w <= MAX_READ_WINDOW), "{:?}", src.windows);
        // the second window was not wiped before being offered again
        assert!(src.saw_marker);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buf = GrowableBuffer::new(64);
        buf.extend_from_slice(&[0u8; 32]);
        let cap = buf.capacity();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), cap);
    }
}
