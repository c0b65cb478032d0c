//! Property tests for padding, word counts and byte packing.

use proptest::prelude::*;

use wt_engine::{encode_sample, PackedWordStream};
use wt_ir::{pad_count, Encoding, RegionKind, SampleInfo, SampleRegion, BLOCK_SAMPLES};

fn encoding() -> impl Strategy<Value = Encoding> {
    prop_oneof![Just(Encoding::Pcm), Just(Encoding::Ulaw)]
}

proptest! {
    #[test]
    fn padding_reaches_block_alignment(n in 0usize..10_000_000) {
        let pad = pad_count(n);
        prop_assert!(pad < BLOCK_SAMPLES);
        prop_assert_eq!((n + pad) % BLOCK_SAMPLES, 0);
    }

    #[test]
    fn every_region_reserves_its_header(samples in 0usize..100_000, enc in encoding()) {
        let region = SampleRegion::from_byte_range(RegionKind::Loop, 0..samples * 2).unwrap();
        prop_assert!(region.word_count(enc) >= 1);
    }

    #[test]
    fn four_bytes_make_one_word(bytes in any::<[u8; 4]>()) {
        let mut stream = PackedWordStream::new();
        for b in bytes {
            stream.push_byte(b);
        }
        let words: Vec<u32> = stream.finish().words().collect();
        prop_assert_eq!(words, vec![u32::from_le_bytes(bytes)]);
    }

    /// The emitted words never outnumber the declared array length.
    #[test]
    fn output_fits_declared_length(
        attack in 0usize..600,
        sustain in 1usize..600,
        decay in 0usize..600,
        enc in encoding(),
    ) {
        let mut sample = SampleInfo::new("prop");
        sample.start_loop = attack * 2;
        sample.end_loop = (attack + sustain) * 2;
        sample.end = (attack + sustain + decay) * 2;
        let pcm = vec![0x5Au8; sample.end];

        let encoded = encode_sample(&sample, &pcm, enc).unwrap();
        prop_assert!(encoded.output.len() <= encoded.declared_len());
        let headers: Vec<u32> = encoded
            .output
            .items()
            .iter()
            .filter_map(|item| match item {
                wt_engine::StreamItem::Header(w) => Some(*w),
                _ => None,
            })
            .collect();
        prop_assert_eq!(headers.len(), 3);
        prop_assert_eq!(headers[0] & 0x00FF_FFFF, attack as u32);
        prop_assert_eq!(headers[1] & 0x00FF_FFFF, sustain as u32);
        prop_assert_eq!(headers[2] & 0x00FF_FFFF, decay as u32);
    }
}
