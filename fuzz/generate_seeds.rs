#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Plain PBM 4x2
    fs::write(format!("{dir}/pbm_ascii_4x2.pbm"), b"P1\n# seed\n4 2\n0101\n1 0 0 1\n").unwrap();

    // Plain PGM 3x1, maxval 15
    fs::write(format!("{dir}/pgm_ascii_3x1.pgm"), b"P2\n3 1\n15\n15 0 7\n").unwrap();

    // Plain PPM 2x1
    fs::write(format!("{dir}/ppm_ascii_2x1.ppm"), b"P3\n2 1\n255\n255 0 0\n0 0 255\n").unwrap();

    // Raw PBM 10x2 (byte or packed, depending on config)
    fs::write(format!("{dir}/pbm_10x2.pbm"), b"P4\n10 2\n\xa5\xc0\x00\x40").unwrap();

    // PGM 3x2
    let pgm = b"P5\n3 2\n255\n\x00\x40\x80\xc0\xff\x64";
    fs::write(format!("{dir}/pgm_3x2.pgm"), pgm).unwrap();

    // PGM 16-bit 1x1
    fs::write(format!("{dir}/pgm16_1x1.pgm"), b"P5\n1 1\n65535\n\x80\x00").unwrap();

    // PPM 2x2
    let ppm = b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80";
    fs::write(format!("{dir}/ppm_2x2.ppm"), ppm).unwrap();

    // PAM RGBA 1x1
    let pam = b"P7\nWIDTH 1\nHEIGHT 1\nDEPTH 4\nMAXVAL 255\nTUPLTYPE RGB_ALPHA\nENDHDR\n\xff\x00\x00\xff";
    fs::write(format!("{dir}/pam_rgba_1x1.pam"), pam).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
    fs::write(format!("{dir}/p9.bin"), b"P9\n1 1\n255\n\x00").unwrap();
    fs::write(format!("{dir}/p7_no_endhdr.bin"), b"P7\nWIDTH 1\nHEIGHT 1\n").unwrap();
    fs::write(format!("{dir}/p5_short.bin"), b"P5\n4 4\n255\n\x00").unwrap();

    println!("Generated seed corpus in {dir}/");
}
