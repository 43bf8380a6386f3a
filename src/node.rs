use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::errors::ListError;

/// Strong handle on a node; the forward chain owns its nodes through these.
pub type NodeRef<T> = Rc<RefCell<Node<T>>>;

/// Non-owning handle, used for back links and the tail of a list.
pub type WeakNodeRef<T> = Weak<RefCell<Node<T>>>;

/// Concrete kind of a node. A chain never mixes kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Singly,
    Doubly,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Singly => f.write_str("singly linked"),
            NodeKind::Doubly => f.write_str("doubly linked"),
        }
    }
}

/// A typed storage cell: a value plus the links tying it into a chain.
///
/// `next` is the only ownership edge. `prev` is weak, so the back link of a
/// doubly linked cell never forms a strong cycle and dropping the chain head
/// releases every node.
pub struct Node<T> {
    kind: NodeKind,
    value: T,
    next: Option<NodeRef<T>>,
    prev: Option<WeakNodeRef<T>>,
}

impl<T> Node<T> {
    /// Allocate a detached singly linked cell.
    pub fn singly(value: T) -> NodeRef<T> {
        Self::detached(NodeKind::Singly, value)
    }

    /// Allocate a detached doubly linked cell.
    pub fn doubly(value: T) -> NodeRef<T> {
        Self::detached(NodeKind::Doubly, value)
    }

    fn detached(kind: NodeKind, value: T) -> NodeRef<T> {
        Rc::new(RefCell::new(Node {
            kind,
            value,
            next: None,
            prev: None,
        }))
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn set_value(&mut self, value: T) {
        self.value = value;
    }

    /// Strong handle on the successor, if any.
    pub fn next(&self) -> Option<NodeRef<T>> {
        self.next.clone()
    }

    /// Set the forward link. Fails with `InvalidLink` when `next` is a node
    /// of a different kind than this one.
    pub fn set_next(&mut self, next: Option<NodeRef<T>>) -> Result<(), ListError> {
        if let Some(node) = &next {
            self.check_kind(node)?;
        }
        self.next = next;
        Ok(())
    }

    /// Predecessor, if this is a doubly linked cell with a live back link.
    pub fn prev(&self) -> Option<NodeRef<T>> {
        self.prev.as_ref().and_then(Weak::upgrade)
    }

    /// Set the back link. Only doubly linked cells carry one; the referent is
    /// stored weakly so the forward chain stays the sole owner.
    pub fn set_prev(&mut self, prev: Option<&NodeRef<T>>) -> Result<(), ListError> {
        if self.kind != NodeKind::Doubly && prev.is_some() {
            return Err(ListError::InvalidLink {
                expected: NodeKind::Doubly,
                found: self.kind,
            });
        }
        if let Some(node) = prev {
            self.check_kind(node)?;
        }
        self.prev = prev.map(Rc::downgrade);
        Ok(())
    }

    pub(crate) fn take_next(&mut self) -> Option<NodeRef<T>> {
        self.next.take()
    }

    fn check_kind(&self, other: &NodeRef<T>) -> Result<(), ListError> {
        let found = other.borrow().kind;
        if found == self.kind {
            Ok(())
        } else {
            Err(ListError::InvalidLink {
                expected: self.kind,
                found,
            })
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Follows `next` only; following `prev` as well would loop.
        match &self.next {
            Some(next) => write!(f, "Node({:?}, {:?})", self.value, next.borrow()),
            None => write!(f, "Node({:?}, None)", self.value),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_link_same_kind() {
        let a = Node::singly(1);
        let b = Node::singly(2);
        a.borrow_mut().set_next(Some(b.clone())).unwrap();
        let next = a.borrow().next().unwrap();
        assert!(Rc::ptr_eq(&next, &b));
    }

    #[test]
    fn forward_link_rejects_mixed_kinds() {
        let a = Node::singly(1);
        let b = Node::doubly(2);
        let err = a.borrow_mut().set_next(Some(b)).unwrap_err();
        assert_eq!(
            err,
            ListError::InvalidLink {
                expected: NodeKind::Singly,
                found: NodeKind::Doubly,
            }
        );
        assert!(a.borrow().next().is_none());
    }

    #[test]
    fn back_link_rejected_on_singly_cell() {
        let a = Node::singly(1);
        let b = Node::singly(2);
        let err = b.borrow_mut().set_prev(Some(&a)).unwrap_err();
        assert_eq!(
            err,
            ListError::InvalidLink {
                expected: NodeKind::Doubly,
                found: NodeKind::Singly,
            }
        );
    }

    #[test]
    fn back_link_is_weak() {
        let a = Node::doubly(1);
        let b = Node::doubly(2);
        b.borrow_mut().set_prev(Some(&a)).unwrap();
        assert!(b.borrow().prev().is_some());

        drop(a);
        assert!(b.borrow().prev().is_none(), "back link must not keep a node alive");
    }

    #[test]
    fn value_accessors() {
        let a = Node::singly(10);
        assert_eq!(*a.borrow().value(), 10);
        a.borrow_mut().set_value(11);
        assert_eq!(*a.borrow().value(), 11);
        *a.borrow_mut().value_mut() += 1;
        assert_eq!(*a.borrow().value(), 12);
    }

    #[test]
    fn debug_form_is_recursive() {
        let a = Node::singly(1);
        let b = Node::singly(2);
        a.borrow_mut().set_next(Some(b)).unwrap();
        assert_eq!(format!("{:?}", a.borrow()), "Node(1, Node(2, None))");
        assert_eq!(format!("{}", a.borrow()), "1");
    }
}
