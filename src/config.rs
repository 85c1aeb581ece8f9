/// How binary samples with `maxval < 255` are mapped to 8-bit output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BinaryScaling {
    /// Copy bytes verbatim; a sample of `maxval` stays `maxval`, not 255.
    ///
    /// Matches the long-standing behavior of decoders that assume binary
    /// 8-bit samples are already full range.
    #[default]
    Passthrough,
    /// Rescale to the full range with `sample * 255 / maxval`.
    Rescale,
}

/// Sample layout of binary PBM (P4) pixel data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PbmPacking {
    /// One byte per sample, like P5 with `maxval = 1`.
    #[default]
    BytePerSample,
    /// Eight samples per byte, MSB first, each row padded to a whole byte.
    PackedBits,
}

/// Decoder behavior switches. The defaults decode bit-for-bit like
/// classic PNM loaders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DecodeConfig {
    pub binary_scaling: BinaryScaling,
    pub pbm_packing: PbmPacking,
}

impl DecodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binary_scaling(mut self, scaling: BinaryScaling) -> Self {
        self.binary_scaling = scaling;
        self
    }

    pub fn with_pbm_packing(mut self, packing: PbmPacking) -> Self {
        self.pbm_packing = packing;
        self
    }
}
