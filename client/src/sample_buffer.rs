use std::collections::VecDeque;

/// Samples kept per quantity while waiting for playback
pub const SAMPLE_BUFFER_CAPACITY: usize = 5;

/// Bounded FIFO of decoded samples. When full, pushing drops the oldest
/// unplayed sample, so the buffer never grows and stays biased towards the
/// most recent state.
#[derive(Clone, Debug)]
pub struct SampleBuffer<T> {
    samples: VecDeque<T>,
    capacity: usize,
}

impl<T> Default for SampleBuffer<T> {
    fn default() -> Self {
        Self::new(SAMPLE_BUFFER_CAPACITY)
    }
}

impl<T> SampleBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a sample, returning the one dropped to make room
    pub fn push(&mut self, sample: T) -> Option<T> {
        let dropped = if self.samples.len() >= self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back(sample);
        dropped
    }

    /// Takes the oldest sample
    pub fn pop(&mut self) -> Option<T> {
        self.samples.pop_front()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.samples.iter()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
