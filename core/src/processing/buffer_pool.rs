use crate::prelude::StageError;

/// Simple scoped buffer pool that prevents unbounded allocations.
pub struct BufferPool {
    buffers: Vec<Vec<f32>>,
    outstanding: usize,
    max_capacity: usize,
}

impl BufferPool {
    pub fn with_capacity(max_capacity: usize) -> Self {
        Self {
            buffers: Vec::with_capacity(max_capacity),
            outstanding: 0,
            max_capacity,
        }
    }

    /// Allocates a buffer from the pool or creates one if there is room.
    pub fn checkout(&mut self, length: usize) -> Result<Vec<f32>, StageError> {
        if let Some(mut buffer) = self.buffers.pop() {
            buffer.resize(length, 0.0);
            self.outstanding += 1;
            Ok(buffer)
        } else if self.outstanding < self.max_capacity {
            self.outstanding += 1;
            Ok(vec![0.0; length])
        } else {
            Err(StageError::BufferExhaustion("pool depleted".to_string()))
        }
    }

    /// Returns a buffer back to the pool for reuse.
    pub fn release(&mut self, mut buffer: Vec<f32>) {
        buffer.clear();
        self.outstanding = self.outstanding.saturating_sub(1);
        if self.buffers.len() < self.max_capacity {
            self.buffers.push(buffer);
        }
    }

    pub fn reset(&mut self) {
        self.buffers.clear();
        self.outstanding = 0;
    }
}
