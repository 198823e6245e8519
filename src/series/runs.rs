//! Run-length encoding over arbitrary categories.

/// A maximal contiguous block of observations sharing a category.
///
/// `start` and `end` are inclusive positional indices into the encoded
/// slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Run<T> {
    pub value: T,
    pub start: usize,
    pub end: usize,
}

impl<T> Run<T> {
    /// Number of observations in the run.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Run-length encode a slice under a caller-supplied key function.
///
/// A single linear scan produces one [`Run`] per maximal block of equal
/// keys. Note that `f64` keys compare with IEEE semantics: NaN never equals
/// NaN, so every NaN observation forms its own run.
pub fn encode_runs<K, T, F>(items: &[K], key: F) -> Vec<Run<T>>
where
    T: PartialEq,
    F: Fn(&K) -> T,
{
    let mut runs = Vec::new();
    let mut iter = items.iter().map(key).enumerate();

    let Some((_, mut current)) = iter.next() else {
        return runs;
    };
    let mut start = 0;

    for (i, k) in iter {
        if k != current {
            runs.push(Run {
                value: std::mem::replace(&mut current, k),
                start,
                end: i - 1,
            });
            start = i;
        }
    }
    runs.push(Run {
        value: current,
        start,
        end: items.len() - 1,
    });

    runs
}
