use crate::errors::ListError;
use crate::list::RevIter;
use crate::node::{Node, NodeKind, NodeRef};

/// Creates the storage cells a list kind chains together.
pub trait NodeFactory<T> {
    /// Node kind every chain of this list kind is built from.
    const KIND: NodeKind;

    fn create_node(value: T) -> NodeRef<T>;
}

/// Wires two nodes together, and takes a node back out of its chain.
pub trait Linker<T> {
    /// Make `right` the successor of `left`, maintaining whatever back links
    /// the kind requires.
    fn link(left: &NodeRef<T>, right: &NodeRef<T>) -> Result<(), ListError>;

    /// Detach `removed` from between its (possibly absent) neighbors and fix
    /// the links of the survivors.
    fn unlink(
        removed: &NodeRef<T>,
        prev: Option<&NodeRef<T>>,
        next: Option<&NodeRef<T>>,
    ) -> Result<(), ListError>;
}

/// Produces the reverse value sequence for a list kind.
pub trait ReverseTraversal<T> {
    fn reversed(head: Option<NodeRef<T>>, tail: Option<NodeRef<T>>, len: usize) -> RevIter<T>;
}

/// Everything a list needs from its kind. Selected once, through the type
/// parameter, instead of overriding methods on the container itself.
pub trait ListKind<T>: NodeFactory<T> + Linker<T> + ReverseTraversal<T> {
    /// Container name used by the constructor-style `Debug` rendering.
    const NAME: &'static str;
}

/// Marker for singly linked chains.
#[derive(Debug, Clone, Copy, Default)]
pub struct Singly;

/// Marker for doubly linked chains.
#[derive(Debug, Clone, Copy, Default)]
pub struct Doubly;

impl<T> NodeFactory<T> for Singly {
    const KIND: NodeKind = NodeKind::Singly;

    fn create_node(value: T) -> NodeRef<T> {
        Node::singly(value)
    }
}

impl<T> Linker<T> for Singly {
    fn link(left: &NodeRef<T>, right: &NodeRef<T>) -> Result<(), ListError> {
        left.borrow_mut().set_next(Some(right.clone()))
    }

    fn unlink(
        _removed: &NodeRef<T>,
        prev: Option<&NodeRef<T>>,
        next: Option<&NodeRef<T>>,
    ) -> Result<(), ListError> {
        // The removed node keeps its own forward link; dropping it releases
        // the reference anyway.
        if let Some(prev) = prev {
            prev.borrow_mut().set_next(next.cloned())?;
        }
        Ok(())
    }
}

impl<T> ReverseTraversal<T> for Singly {
    fn reversed(head: Option<NodeRef<T>>, _tail: Option<NodeRef<T>>, len: usize) -> RevIter<T> {
        RevIter::by_index(head, len)
    }
}

impl<T> ListKind<T> for Singly {
    const NAME: &'static str = "LinkedList";
}

impl<T> NodeFactory<T> for Doubly {
    const KIND: NodeKind = NodeKind::Doubly;

    fn create_node(value: T) -> NodeRef<T> {
        Node::doubly(value)
    }
}

impl<T> Linker<T> for Doubly {
    fn link(left: &NodeRef<T>, right: &NodeRef<T>) -> Result<(), ListError> {
        left.borrow_mut().set_next(Some(right.clone()))?;
        right.borrow_mut().set_prev(Some(left))?;
        Ok(())
    }

    fn unlink(
        removed: &NodeRef<T>,
        prev: Option<&NodeRef<T>>,
        next: Option<&NodeRef<T>>,
    ) -> Result<(), ListError> {
        match (prev, next) {
            (Some(prev), Some(next)) => Self::link(prev, next)?,
            (Some(prev), None) => prev.borrow_mut().set_next(None)?,
            (None, Some(next)) => next.borrow_mut().set_prev(None)?,
            (None, None) => {}
        }

        // A detached node must hold no dangling links.
        let mut cell = removed.borrow_mut();
        cell.set_next(None)?;
        cell.set_prev(None)?;
        Ok(())
    }
}

impl<T> ReverseTraversal<T> for Doubly {
    fn reversed(_head: Option<NodeRef<T>>, tail: Option<NodeRef<T>>, len: usize) -> RevIter<T> {
        RevIter::by_back_links(tail, len)
    }
}

impl<T> ListKind<T> for Doubly {
    const NAME: &'static str = "DoubleLinkedList";
}
