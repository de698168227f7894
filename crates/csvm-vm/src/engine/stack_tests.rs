//! Tests for the bounded stack.

use super::stack::{BoundedStack, OPERAND_STACK_CAPACITY, OperandStack, StackFault};

#[test]
fn push_then_pop_returns_value() {
    let mut stack = OperandStack::new();
    stack.push(i64::MIN).unwrap();
    assert_eq!(stack.pop(), Ok(i64::MIN));
    assert!(stack.is_empty());
}

#[test]
fn balanced_pushes_and_pops_restore_depth() {
    let mut stack = OperandStack::new();
    stack.push(1).unwrap();
    let before = stack.depth();

    for v in 0..10 {
        stack.push(v).unwrap();
    }
    for _ in 0..10 {
        stack.pop().unwrap();
    }

    assert_eq!(stack.depth(), before);
    assert_eq!(stack.as_slice(), [1]);
}

#[test]
fn pop_is_lifo() {
    let mut stack = BoundedStack::<u8, 4>::new();
    stack.push(1).unwrap();
    stack.push(2).unwrap();
    assert_eq!(stack.pop(), Ok(2));
    assert_eq!(stack.pop(), Ok(1));
}

#[test]
fn overflow_past_capacity() {
    let mut stack = OperandStack::new();
    for v in 0..OPERAND_STACK_CAPACITY as i64 {
        stack.push(v).unwrap();
    }

    assert_eq!(stack.depth(), 256);
    assert_eq!(stack.push(0), Err(StackFault::Overflow));
    assert_eq!(stack.depth(), 256);
    assert_eq!(stack.peek(), Ok(255));
}

#[test]
fn underflow_on_empty() {
    let mut stack = BoundedStack::<usize, 2>::new();
    assert_eq!(stack.pop(), Err(StackFault::Underflow));
    assert_eq!(stack.peek(), Err(StackFault::Underflow));
    assert_eq!(stack.depth(), 0);
}

#[test]
fn peek_does_not_remove() {
    let mut stack = BoundedStack::<i64, 2>::new();
    stack.push(5).unwrap();
    assert_eq!(stack.peek(), Ok(5));
    assert_eq!(stack.depth(), 1);
}

#[test]
fn clear_and_debug() {
    let mut stack = BoundedStack::<i64, 3>::new();
    stack.push(1).unwrap();
    stack.push(-2).unwrap();
    assert_eq!(format!("{stack:?}"), "[1, -2]");

    stack.clear();
    assert!(stack.is_empty());
    assert_eq!(stack.capacity(), 3);
}
