//! Opaque payloads attached to the model.
//!
//! Neither extension blocks nor method bodies are interpreted here: they are
//! stored, compared and handed back to sinks exactly as received.
use std::{fmt, sync::Arc};

use downcast_rs::{DowncastSync, impl_downcast};

/// A name-tagged attribute payload, replayed positionally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionBlock {
    pub name: String,
    pub payload: Arc<[u8]>,
}

impl ExtensionBlock {
    pub fn new(name: impl Into<String>, payload: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
        }
    }
}

/// Instruction-level body of a method, defined by whichever crate reads or
/// writes code. Retrieve the concrete type through [`BodyHandle::downcast_ref`].
pub trait MethodBody: DowncastSync + fmt::Debug {}
impl_downcast!(sync MethodBody);

/// Shared handle to a [`MethodBody`].
///
/// Cloning shares the body. Two handles are equal only when they point to the
/// same body.
#[derive(Debug, Clone)]
pub struct BodyHandle(Arc<dyn MethodBody>);

impl BodyHandle {
    pub fn new<B: MethodBody>(body: B) -> Self {
        Self(Arc::new(body))
    }

    pub fn get(&self) -> &dyn MethodBody {
        &*self.0
    }

    pub fn downcast_ref<B: MethodBody>(&self) -> Option<&B> {
        self.0.downcast_ref::<B>()
    }
}

impl From<Arc<dyn MethodBody>> for BodyHandle {
    fn from(body: Arc<dyn MethodBody>) -> Self {
        Self(body)
    }
}

impl PartialEq for BodyHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for BodyHandle {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Bytecode(Vec<u8>);
    impl MethodBody for Bytecode {}

    #[derive(Debug)]
    struct Native;
    impl MethodBody for Native {}

    #[test]
    fn body_handles_compare_by_identity() {
        let body = BodyHandle::new(Bytecode(vec![0xb1]));
        let shared = body.clone();
        let lookalike = BodyHandle::new(Bytecode(vec![0xb1]));
        assert_eq!(body, shared);
        assert_ne!(body, lookalike);
    }

    #[test]
    fn body_downcasts_to_concrete_type() {
        let body = BodyHandle::new(Bytecode(vec![0x2a, 0xb0]));
        assert_eq!(body.downcast_ref::<Bytecode>(), Some(&Bytecode(vec![0x2a, 0xb0])));
        assert!(body.downcast_ref::<Native>().is_none());
    }

    #[test]
    fn extension_payload_accepts_vectors_and_slices() {
        let from_vec = ExtensionBlock::new("Custom", vec![1u8, 2, 3]);
        let from_slice = ExtensionBlock::new("Custom", &[1u8, 2, 3][..]);
        assert_eq!(from_vec, from_slice);
    }
}
