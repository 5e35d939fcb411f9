/*++

Licensed under the Apache-2.0 license.

File Name:

    words.rs

Abstract:

    File contains byte/word packing helpers for the data and digest registers.

--*/

/// Pack up to four bytes into a data-register word, first byte lowest.
/// Missing trailing bytes are zero.
pub(crate) fn pack_le(bytes: &[u8]) -> u32 {
    let mut word = [0u8; 4];
    let len = bytes.len().min(4);
    word[..len].copy_from_slice(&bytes[..len]);
    u32::from_le_bytes(word)
}

/// Store a digest-register word most significant byte first, truncated to
/// `out.len()` bytes.
pub(crate) fn unpack_be(word: u32, out: &mut [u8]) {
    out.iter_mut()
        .zip(word.to_be_bytes())
        .for_each(|(dest, src)| *dest = src);
}
