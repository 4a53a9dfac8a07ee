#![no_main]

use libfuzzer_sys::fuzz_target;
use spanstream::prelude::*;

fuzz_target!(|data: &[u8]| {
    let mut stream = ReadOnlyByteStream::new(data);
    while stream.has_remaining() {
        match stream.read_sub_stream() {
            Ok(mut record) => {
                while record.read_vlq().is_ok() {}
                assert!(record.position() <= record.len());
            }
            Err(_) => {
                if stream.read_byte().is_none() {
                    break;
                }
            }
        }
        assert!(stream.position() <= stream.len());
    }
});
