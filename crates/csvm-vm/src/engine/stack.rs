//! Fixed-capacity LIFO storage for operands and return addresses.
//!
//! Capacity is a const parameter, so the backing array lives inline in the
//! VM and nothing is allocated during a run.

/// Operand stack depth limit.
pub const OPERAND_STACK_CAPACITY: usize = 256;
/// Call stack depth limit.
pub const CALL_STACK_CAPACITY: usize = 256;

/// Capacity violation reported by [`BoundedStack`].
///
/// The stack does not know which storage area it backs; the engine maps the
/// fault to the operand-stack or call-stack error category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackFault {
    Overflow,
    Underflow,
}

/// Array-backed stack holding at most `N` values.
#[derive(Clone)]
pub struct BoundedStack<T, const N: usize> {
    items: [T; N],
    depth: usize,
}

/// Signed 64-bit operand stack.
pub type OperandStack = BoundedStack<i64, OPERAND_STACK_CAPACITY>;
/// Return-address stack.
pub type CallStack = BoundedStack<usize, CALL_STACK_CAPACITY>;

impl<T: Copy + Default, const N: usize> BoundedStack<T, N> {
    pub fn new() -> Self {
        Self {
            items: [T::default(); N],
            depth: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, value: T) -> Result<(), StackFault> {
        if self.depth >= N {
            return Err(StackFault::Overflow);
        }
        self.items[self.depth] = value;
        self.depth += 1;
        Ok(())
    }

    #[inline]
    pub fn pop(&mut self) -> Result<T, StackFault> {
        if self.depth == 0 {
            return Err(StackFault::Underflow);
        }
        self.depth -= 1;
        Ok(self.items[self.depth])
    }

    /// Top value without removing it.
    #[inline]
    pub fn peek(&self) -> Result<T, StackFault> {
        self.as_slice().last().copied().ok_or(StackFault::Underflow)
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Live values, bottom first.
    pub fn as_slice(&self) -> &[T] {
        &self.items[..self.depth]
    }

    pub fn clear(&mut self) {
        self.depth = 0;
    }
}

impl<T: Copy + Default, const N: usize> Default for BoundedStack<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default + std::fmt::Debug, const N: usize> std::fmt::Debug for BoundedStack<T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
