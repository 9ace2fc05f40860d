use core::mem;

/// LSD radix sort of sparse-row entries by column index.
/// - Sorts `cols` ascending
/// - Reorders `vals` alongside, keeping each (column, value) pair together
/// - Stable
///
/// Used when a document's term counts (hash order) become a sparse row
/// (column order). 4 byte passes, each O(n + 256).
pub fn sort_columns<N>(cols: &mut [u32], vals: &mut [N])
where
    N: Copy + Default,
{
    assert_eq!(cols.len(), vals.len(), "columns and values must align");
    let n = cols.len();
    if n <= 1 {
        return;
    }

    if n <= 32 {
        insertion_sort_columns(cols, vals);
        return;
    }

    let mut cols_tmp = vec![0u32; n];
    let mut vals_tmp = vec![N::default(); n];

    let mut src_cols: &mut [u32] = cols;
    let mut src_vals: &mut [N] = vals;
    let mut dst_cols: &mut [u32] = &mut cols_tmp;
    let mut dst_vals: &mut [N] = &mut vals_tmp;

    for shift in [0u32, 8, 16, 24] {
        let mut count = [0usize; 256];
        for &k in src_cols.iter() {
            count[((k >> shift) & 0xFF) as usize] += 1;
        }

        let mut sum = 0usize;
        for c in count.iter_mut() {
            let tmp = *c;
            *c = sum;
            sum += tmp;
        }

        for idx in 0..n {
            let k = src_cols[idx];
            let b = ((k >> shift) & 0xFF) as usize;
            let pos = count[b];
            count[b] = pos + 1;
            dst_cols[pos] = k;
            dst_vals[pos] = src_vals[idx];
        }

        mem::swap(&mut src_cols, &mut dst_cols);
        mem::swap(&mut src_vals, &mut dst_vals);
    }
    // even pass count: the sorted data ends up back in the caller's slices
}

fn insertion_sort_columns<N: Copy>(cols: &mut [u32], vals: &mut [N]) {
    for i in 1..cols.len() {
        let mut j = i;
        while j > 0 && cols[j] < cols[j - 1] {
            cols.swap(j, j - 1);
            vals.swap(j, j - 1);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline_stable_sort<N: Copy>(cols: &[u32], vals: &[N]) -> (Vec<u32>, Vec<N>) {
        let mut pairs: Vec<(u32, usize, N)> = cols
            .iter()
            .copied()
            .enumerate()
            .map(|(i, k)| (k, i, vals[i]))
            .collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        pairs.into_iter().map(|(k, _, v)| (k, v)).unzip()
    }

    /// xorshift32
    struct Rng(u32);
    impl Rng {
        fn next_u32(&mut self) -> u32 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            self.0 = x;
            x
        }
    }

    #[test]
    fn handles_empty_and_single() {
        let mut cols: Vec<u32> = vec![];
        let mut vals: Vec<f64> = vec![];
        sort_columns(&mut cols, &mut vals);
        assert!(cols.is_empty());

        let mut cols = vec![42u32];
        let mut vals = vec![0.5f64];
        sort_columns(&mut cols, &mut vals);
        assert_eq!(cols, vec![42]);
        assert_eq!(vals, vec![0.5]);
    }

    #[test]
    fn keeps_pairs_together_on_duplicates() {
        let mut cols = vec![3u32, 1, 3, 2, 1, 3, 0];
        let mut vals: Vec<u32> = (0..cols.len() as u32).collect();
        let (base_c, base_v) = baseline_stable_sort(&cols, &vals);
        sort_columns(&mut cols, &mut vals);
        assert_eq!(cols, base_c);
        assert_eq!(vals, base_v);
    }

    #[test]
    fn matches_baseline_across_sizes() {
        let mut rng = Rng(0x1234_5678);
        for &n in &[2usize, 7, 31, 32, 33, 64, 129, 1024] {
            let mut cols = Vec::with_capacity(n);
            let mut vals = Vec::with_capacity(n);
            for i in 0..n {
                cols.push(rng.next_u32() & 0x00FF_FFFF);
                vals.push(i as f64);
            }
            let (base_c, base_v) = baseline_stable_sort(&cols, &vals);
            sort_columns(&mut cols, &mut vals);
            assert_eq!(cols, base_c, "columns mismatch at n={n}");
            assert_eq!(vals, base_v, "values mismatch at n={n}");
        }
    }

    #[test]
    fn extremes() {
        let mut cols = vec![0u32, u32::MAX, 1, u32::MAX - 1, 0, 2, u32::MAX];
        let mut vals: Vec<u32> = (0..cols.len() as u32).collect();
        let (base_c, base_v) = baseline_stable_sort(&cols, &vals);
        sort_columns(&mut cols, &mut vals);
        assert_eq!(cols, base_c);
        assert_eq!(vals, base_v);
    }
}
