use super::tables::Tables;

/// Copies `real` into the working buffers scaled by 1/N, zeroing the imaginary part.
pub(crate) fn load_real(re: &mut [f64], im: &mut [f64], real: &[f64]) {
    let n = re.len() as f64;
    for ((r, i), &x) in re.iter_mut().zip(im.iter_mut()).zip(real) {
        *r = x / n;
        *i = 0.0;
    }
}

/// Copies both components into the working buffers scaled by 1/N.
pub(crate) fn load_complex(re: &mut [f64], im: &mut [f64], real: &[f64], imag: &[f64]) {
    let n = re.len() as f64;
    for ((r, i), (&x, &y)) in re.iter_mut().zip(im.iter_mut()).zip(real.iter().zip(imag)) {
        *r = x / n;
        *i = y / n;
    }
}

/// In-place radix-2 transform of `re`/`im`, then magnitudes of the first N/2
/// bins (read back through the bit-reversal table) into `spectrum`.
///
/// The butterfly network leaves its output in bit-reversed order; no scratch
/// memory is touched besides the caller's buffers.
pub(crate) fn run(tables: &Tables, re: &mut [f64], im: &mut [f64], spectrum: &mut [f64]) {
    let n = re.len();
    let quarter = n >> 2;
    let mut span = n / 2;
    let mut groups = 1;

    for _ in 0..tables.power {
        let mut start = 0;
        for _ in 0..groups {
            let y = tables.permute[start / span];
            // cos(x) == sin(x + pi/2)
            let wr = tables.sines[(y + quarter) % n];
            let wi = -tables.sines[y];

            for top in start..start + span {
                let bottom = top + span;
                let (ar, ai) = (re[top], im[top]);
                let br = wr * re[bottom] - wi * im[bottom];
                let bi = wi * re[bottom] + wr * im[bottom];

                re[top] = ar + br;
                im[top] = ai + bi;
                re[bottom] = ar - br;
                im[bottom] = ai - bi;
            }

            start += span << 1;
        }
        span >>= 1;
        groups <<= 1;
    }

    for (bin, magnitude) in spectrum.iter_mut().enumerate() {
        let p = tables.permute[bin];
        *magnitude = (re[p] * re[p] + im[p] * im[p]).sqrt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::{num_complex::Complex, FftPlanner};

    fn transform(real: &[f64], imag: &[f64]) -> Vec<f64> {
        let n = real.len();
        let tables = Tables::build(n as f64, n).unwrap();
        let mut re = vec![0.0; n];
        let mut im = vec![0.0; n];
        let mut spectrum = vec![0.0; n / 2];
        load_complex(&mut re, &mut im, real, imag);
        run(&tables, &mut re, &mut im, &mut spectrum);
        spectrum
    }

    fn reference(real: &[f64], imag: &[f64]) -> Vec<f64> {
        let n = real.len();
        let mut buffer: Vec<Complex<f64>> = real
            .iter()
            .zip(imag)
            .map(|(&r, &i)| Complex::new(r, i))
            .collect();
        FftPlanner::<f64>::new().plan_fft_forward(n).process(&mut buffer);
        buffer[..n / 2].iter().map(|c| c.norm() / n as f64).collect()
    }

    // Deterministic pseudo-random samples in [-1, 1).
    fn noise(n: usize, seed: u64) -> Vec<f64> {
        let mut state = seed;
        (0..n)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                (state >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
            })
            .collect()
    }

    #[test]
    fn matches_reference_fft() {
        for (power, seed) in (2..=11).zip(1u64..) {
            let n = 1usize << power;
            let real = noise(n, seed);
            let imag = noise(n, seed * 7919);
            let ours = transform(&real, &imag);
            let theirs = reference(&real, &imag);
            for (bin, (a, b)) in ours.iter().zip(&theirs).enumerate() {
                assert!((a - b).abs() < 1e-12, "n={} bin={} {} vs {}", n, bin, a, b);
            }
        }
    }

    #[test]
    fn zero_input_gives_zero_spectrum() {
        let spectrum = transform(&[0.0; 64], &[0.0; 64]);
        assert!(spectrum.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn real_sine_splits_between_mirrored_bins() {
        let n = 64;
        let real: Vec<f64> = (0..n)
            .map(|k| (2.0 * std::f64::consts::PI * 3.0 * k as f64 / n as f64).sin())
            .collect();
        let spectrum = transform(&real, &vec![0.0; n]);
        assert!((spectrum[3] - 0.5).abs() < 1e-12);
        for (bin, &m) in spectrum.iter().enumerate() {
            if bin != 3 {
                assert!(m < 1e-12, "bin {} = {}", bin, m);
            }
        }
    }

    #[test]
    fn complex_exponential_lands_in_one_bin() {
        let n = 64;
        let angle = |k: usize| 2.0 * std::f64::consts::PI * 5.0 * k as f64 / n as f64;
        let real: Vec<f64> = (0..n).map(|k| angle(k).cos()).collect();
        let imag: Vec<f64> = (0..n).map(|k| angle(k).sin()).collect();
        let spectrum = transform(&real, &imag);
        assert!((spectrum[5] - 1.0).abs() < 1e-12);
        assert!(spectrum.iter().enumerate().all(|(b, &m)| b == 5 || m < 1e-12));
    }

    #[test]
    fn load_real_scales_and_clears_imaginary() {
        let mut re = vec![9.0; 4];
        let mut im = vec![9.0; 4];
        load_real(&mut re, &mut im, &[4.0, -8.0, 2.0, 0.0]);
        assert_eq!(re, vec![1.0, -2.0, 0.5, 0.0]);
        assert_eq!(im, vec![0.0; 4]);
    }
}
