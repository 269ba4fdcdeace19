//! Fixed-capacity ring of shadow-casting objects.
//!
//! Objects are registered before their silhouette is drawn and looked up by
//! identity during the casting pass. The ring holds [`CAPACITY`] slots;
//! registering more objects than that between two [`ObjectRegistry::clear`]
//! calls silently reuses the oldest slots, so two shapes can end up sharing an
//! identity. Keeping under capacity is the caller's job.

use crate::identity::{Identity, ObjectId, CAPACITY};

/// Height attributes of one registered object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShadowAttributes {
    /// Self-shading sample distance along the light direction.
    pub inner_height: i32,
    /// Cast-shadow distance onto whatever lies beneath.
    pub outer_height: i32,
    /// Object this one is drawn over. When set, background and this
    /// identity count as "still this shape" during self-shading.
    pub over: Option<Identity>,
}

impl ShadowAttributes {
    pub fn new(inner_height: i32, outer_height: i32) -> Self {
        Self { inner_height, outer_height, over: None }
    }

    /// Builder-style setter for the "drawn over" relation.
    pub fn over(mut self, identity: Identity) -> Self {
        self.over = Some(identity);
        self
    }

    /// Total elevation used to rank objects against each other.
    pub fn elevation(&self) -> i64 {
        i64::from(self.inner_height) + i64::from(self.outer_height)
    }
}

/// Ring buffer of registered objects.
#[derive(Debug, Clone)]
pub struct ObjectRegistry {
    slots: [ShadowAttributes; CAPACITY],
    next: usize,
    registered: usize,
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { slots: [ShadowAttributes::default(); CAPACITY], next: 0, registered: 0 }
    }

    /// Register an object and return the identity to draw its silhouette with.
    ///
    /// Never fails. Past [`CAPACITY`] registrations the ring wraps and the
    /// oldest slot is overwritten.
    pub fn register(
        &mut self,
        inner_height: i32,
        outer_height: i32,
        over: Option<Identity>,
    ) -> Identity {
        self.insert(ShadowAttributes { inner_height, outer_height, over })
    }

    /// Register prebuilt attributes.
    pub fn insert(&mut self, attributes: ShadowAttributes) -> Identity {
        let id = ObjectId::from_slot(self.next);
        if self.registered >= CAPACITY {
            tracing::debug!(slot = id.index(), "object registry wrapped, reusing slot");
        }
        self.slots[id.index()] = attributes;
        self.next = (self.next + 1) % CAPACITY;
        self.registered += 1;
        Identity::Object(id)
    }

    /// Attributes stored for `id`.
    #[inline]
    pub fn attributes_of(&self, id: ObjectId) -> &ShadowAttributes {
        &self.slots[id.index()]
    }

    /// Attributes for an identity; `None` for background.
    #[inline]
    pub fn lookup(&self, identity: Identity) -> Option<&ShadowAttributes> {
        identity.object().map(|id| self.attributes_of(id))
    }

    /// Number of registrations since the last clear, including wrapped ones.
    pub fn registered(&self) -> usize {
        self.registered
    }

    /// Whether registrations since the last clear exceeded capacity.
    pub fn has_wrapped(&self) -> bool {
        self.registered > CAPACITY
    }

    /// Rewind the ring so the next registration gets the first slot again.
    pub fn clear(&mut self) {
        self.slots = [ShadowAttributes::default(); CAPACITY];
        self.next = 0;
        self.registered = 0;
    }
}
