//! Small on-disk audio files for tests.

use std::fs;
use std::path::Path;

/// Write an untagged 8 kHz mono 8-bit PCM WAV lasting `secs` seconds.
pub(crate) fn write_wav(path: &Path, secs: u32) {
    let data_len: u32 = 8_000 * secs;
    let mut bytes: Vec<u8> = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // channels
    bytes.extend_from_slice(&8_000u32.to_le_bytes()); // sample rate
    bytes.extend_from_slice(&8_000u32.to_le_bytes()); // byte rate
    bytes.extend_from_slice(&1u16.to_le_bytes()); // block align
    bytes.extend_from_slice(&8u16.to_le_bytes()); // bits per sample
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 128);
    fs::write(path, bytes).unwrap();
}
