/// Returns a frequency count of the input data, one slot per byte value.
pub fn freqs(data: &[u8]) -> Vec<u64> {
    let mut freqs = vec![0_u64; 256];
    data.iter().for_each(|&el| freqs[el as usize] += 1);
    freqs
}

/// Returns the (byte, count) pairs of every byte value present in the input,
/// in ascending byte order. Tree building depends on this order being stable.
pub fn distinct_symbols(data: &[u8]) -> Vec<(u8, u64)> {
    freqs(data)
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(byte, &count)| (byte as u8, count))
        .collect()
}
