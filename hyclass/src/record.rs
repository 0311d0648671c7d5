use log::trace;

use crate::{
    config::ReplacePolicy,
    error::CheckResult,
    metadata::{MemberMetadata, impl_member_sink},
    sink::{ClassSink, RecordComponentSink},
    tier::Tier,
};

/// One component of a record class header.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordComponentModel {
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
    pub metadata: MemberMetadata,
}

impl RecordComponentModel {
    pub fn new(
        name: impl Into<String>,
        descriptor: impl Into<String>,
        signature: Option<String>,
    ) -> Self {
        Self::with_policy(name, descriptor, signature, ReplacePolicy::default())
    }

    pub(crate) fn with_policy(
        name: impl Into<String>,
        descriptor: impl Into<String>,
        signature: Option<String>,
        policy: ReplacePolicy,
    ) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
            signature,
            metadata: MemberMetadata::new(policy),
        }
    }

    /// The record shape itself is gated by the owning class.
    pub fn check(&self, tier: Tier) -> CheckResult {
        self.metadata.check_type_annotations(tier, &self.name)?;
        self.metadata.check_children(tier)
    }

    pub fn accept<S: ClassSink + ?Sized>(&self, sink: &mut S) {
        let component_sink =
            sink.add_record_component(&self.name, &self.descriptor, self.signature.as_deref());
        let Some(component_sink) = component_sink else {
            trace!("interior of record component `{}` pruned by sink", self.name);
            return;
        };
        self.metadata.replay(component_sink);
        component_sink.end();
    }
}

impl_member_sink!(RecordComponentModel);

impl RecordComponentSink for RecordComponentModel {}
