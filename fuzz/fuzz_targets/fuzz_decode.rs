#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpnm::{BinaryScaling, DecodeConfig, DecodeRequest, PbmPacking};

fuzz_target!(|data: &[u8]| {
    // Default settings and every non-default switch - must never panic
    let _ = zenpnm::decode(data, enough::Unstoppable);

    let config = DecodeConfig::new()
        .with_binary_scaling(BinaryScaling::Rescale)
        .with_pbm_packing(PbmPacking::PackedBits);
    let _ = DecodeRequest::new(data)
        .with_config(config)
        .decode(enough::Unstoppable);
});
