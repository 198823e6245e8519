//! Local-maximum detection with windowed prominence.
//!
//! Prominence of a peak is the vertical drop from the peak to the lowest
//! point separating it from a higher sample, evaluated within a limited
//! look-around window so distant higher peaks do not shadow local events.

/// Configuration for peak detection.
#[derive(Debug, Clone, Default)]
pub struct PeakConfig {
    /// Minimum peak height (inclusive).
    pub min_height: Option<f64>,
    /// Minimum peak prominence (inclusive).
    pub min_prominence: Option<f64>,
    /// Look-around window, in samples, for the prominence bases. Rounded up
    /// to an odd count centered on the peak. `None` means unlimited.
    pub wlen: Option<usize>,
}

impl PeakConfig {
    pub fn min_height(mut self, height: f64) -> Self {
        self.min_height = Some(height);
        self
    }

    pub fn min_prominence(mut self, prominence: f64) -> Self {
        self.min_prominence = Some(prominence);
        self
    }

    pub fn wlen(mut self, wlen: usize) -> Self {
        self.wlen = Some(wlen);
        self
    }
}

/// Result of peak detection.
#[derive(Debug, Clone)]
pub struct PeakResult {
    /// Indices of retained peaks (plateau midpoints for flat tops).
    pub indices: Vec<usize>,
    /// Prominence of each retained peak.
    pub prominences: Vec<f64>,
}

impl PeakResult {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Detect local maxima and their prominences.
pub fn find_peaks(series: &[f64], config: &PeakConfig) -> PeakResult {
    let mut indices = local_maxima(series);

    if let Some(h) = config.min_height {
        indices.retain(|&i| series[i] >= h);
    }

    let mut prominences: Vec<f64> = indices
        .iter()
        .map(|&i| prominence_at(series, i, config.wlen))
        .collect();

    if let Some(p) = config.min_prominence {
        let keep: Vec<bool> = prominences.iter().map(|&pr| pr >= p).collect();
        indices = indices
            .into_iter()
            .zip(keep.iter())
            .filter(|(_, &k)| k)
            .map(|(i, _)| i)
            .collect();
        prominences = prominences
            .into_iter()
            .zip(keep.iter())
            .filter(|(_, &k)| k)
            .map(|(pr, _)| pr)
            .collect();
    }

    PeakResult {
        indices,
        prominences,
    }
}

/// Indices of local maxima; a flat-topped maximum reports its midpoint.
fn local_maxima(series: &[f64]) -> Vec<usize> {
    let n = series.len();
    let mut maxima = Vec::new();
    let mut i = 1;
    while n >= 3 && i < n - 1 {
        if series[i - 1] < series[i] {
            // Walk across a possible plateau
            let mut ahead = i + 1;
            while ahead < n - 1 && series[ahead] == series[i] {
                ahead += 1;
            }
            if series[ahead] < series[i] {
                maxima.push((i + ahead - 1) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }
    maxima
}

/// Prominence of the peak at `peak`, bounded by a window of `wlen` samples.
fn prominence_at(series: &[f64], peak: usize, wlen: Option<usize>) -> f64 {
    let n = series.len();
    let half = wlen.map(|w| w.max(3) / 2);

    let i_min = half.map(|h| peak.saturating_sub(h)).unwrap_or(0);
    let i_max = half.map(|h| (peak + h).min(n - 1)).unwrap_or(n - 1);

    // Lowest point between the peak and the nearest higher sample (or the
    // window edge) on each side
    let mut left_base = series[peak];
    let mut i = peak;
    while i > i_min {
        i -= 1;
        if series[i] > series[peak] {
            break;
        }
        left_base = left_base.min(series[i]);
    }

    let mut right_base = series[peak];
    let mut i = peak;
    while i < i_max {
        i += 1;
        if series[i] > series[peak] {
            break;
        }
        right_base = right_base.min(series[i]);
    }

    series[peak] - left_base.max(right_base)
}
