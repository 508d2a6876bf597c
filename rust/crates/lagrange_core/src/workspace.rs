//! Scratch arena for precision-typed temporaries
//!
//! A [`WorkspaceBuffer`] hands out MPFR floats at the owning instance's
//! precision. Values are borrowed through a [`Scratch`] guard and go back to
//! the free list when the guard is dropped, so every exit path of a solver
//! (including early returns) releases what it took.
//!
//! The buffer uses interior mutability so nested helpers can draw their own
//! scratch while an outer guard is alive. The buffer is `!Sync`; one buffer
//! serves one invocation at a time.

use rug::Float;
use std::cell::{Cell, RefCell};
use std::ops::{Deref, DerefMut};

use crate::precision::FloatContext;

/// Free-list arena of MPFR floats sharing one [`FloatContext`]
#[derive(Debug)]
pub struct WorkspaceBuffer {
    context: FloatContext,
    free: RefCell<Vec<Float>>,
    in_use: Cell<usize>,
    peak: Cell<usize>,
}

impl WorkspaceBuffer {
    /// Create a buffer with `capacity` floats preallocated
    pub fn new(capacity: usize, context: FloatContext) -> Self {
        let free = (0..capacity).map(|_| context.zero()).collect();
        Self {
            context,
            free: RefCell::new(free),
            in_use: Cell::new(0),
            peak: Cell::new(0),
        }
    }

    /// Precision and rounding inherited by every float in this buffer
    pub fn context(&self) -> &FloatContext {
        &self.context
    }

    /// Borrow `n` scratch floats. Their values are unspecified.
    pub fn walloc(&self, n: usize) -> Scratch<'_> {
        let mut values = Vec::with_capacity(n);
        {
            let mut free = self.free.borrow_mut();
            for _ in 0..n {
                values.push(free.pop().unwrap_or_else(|| self.context.zero()));
            }
        }

        let in_use = self.in_use.get() + n;
        self.in_use.set(in_use);
        if in_use > self.peak.get() {
            self.peak.set(in_use);
        }

        Scratch { owner: self, values }
    }

    /// Number of floats currently handed out
    pub fn in_use(&self) -> usize {
        self.in_use.get()
    }

    /// Largest number of floats handed out at once
    pub fn peak(&self) -> usize {
        self.peak.get()
    }

    fn release(&self, values: &mut Vec<Float>) {
        self.in_use.set(self.in_use.get() - values.len());
        self.free.borrow_mut().append(values);
    }
}

/// Scoped loan of scratch floats; returned to the buffer on drop
#[derive(Debug)]
pub struct Scratch<'a> {
    owner: &'a WorkspaceBuffer,
    values: Vec<Float>,
}

impl Deref for Scratch<'_> {
    type Target = [Float];

    fn deref(&self) -> &[Float] {
        &self.values
    }
}

impl DerefMut for Scratch<'_> {
    fn deref_mut(&mut self) -> &mut [Float] {
        &mut self.values
    }
}

impl Drop for Scratch<'_> {
    fn drop(&mut self) {
        self.owner.release(&mut self.values);
    }
}
