/// Stable handle to a node slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// Slot storage for list nodes. Freed slots are reused by later inserts, so
/// a `NodeId` is only meaningful while its node is linked.
#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, value: T) -> NodeId {
        if let Some(idx) = self.free.pop() {
            self.slots[idx] = Some(value);
            NodeId(idx)
        } else {
            self.slots.push(Some(value));
            NodeId(self.slots.len() - 1)
        }
    }

    /// Releases a slot and returns its node.
    ///
    /// # Panics
    /// If `id` does not refer to a live node.
    pub(crate) fn take(&mut self, id: NodeId) -> T {
        let value = self.slots[id.0]
            .take()
            .expect("`Arena::take()` - node id is not live");
        self.free.push(id.0);
        value
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &T {
        self.slots[id.0]
            .as_ref()
            .expect("`Arena::get()` - node id is not live")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut T {
        self.slots[id.0]
            .as_mut()
            .expect("`Arena::get_mut()` - node id is not live")
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
