//! Core Effect trait.
//!
//! Every processor in the workspace is mono, `f32` in and `f32` out, and
//! runs at the fixed [`SAMPLE_RATE`](crate::SAMPLE_RATE). The trait is
//! object-safe, so hosts can hold a `Box<dyn Effect>`.
//!
//! None of the methods allocate.

/// Core trait for all audio effects.
///
/// # Example
///
/// ```rust
/// use biphase_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn reset(&mut self) {
///         // Gain has no internal state to reset
///     }
/// }
///
/// let mut g = Gain { gain: 0.5 };
/// let mut buf = [1.0, -1.0];
/// g.process_block_inplace(&mut buf);
/// assert_eq!(buf, [0.5, -0.5]);
/// ```
pub trait Effect {
    /// Process a single sample, advancing internal state by one step.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// Default implementation calls `process()` for each sample. Only
    /// `min(input.len(), output.len())` samples are written.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in-place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Reset internal state.
    ///
    /// Clears filter history, feedback memory and oscillator phase without
    /// changing parameters.
    fn reset(&mut self);
}

impl<E: Effect + ?Sized> Effect for &mut E {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        (**self).process(input)
    }

    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        (**self).process_block(input, output);
    }

    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        (**self).process_block_inplace(buffer);
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}
