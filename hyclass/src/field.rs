use log::trace;
use strum::{EnumIs, EnumTryAs};

use crate::{
    access::AccessFlags,
    annotation::AnnotationModel,
    config::ReplacePolicy,
    error::CheckResult,
    metadata::{MemberMetadata, impl_member_sink},
    sink::{ClassSink, FieldSink},
    tier::Tier,
};

/// Initial value of a field.
///
/// Whether the value matches the field descriptor is left to the writer.
#[derive(Debug, Clone, PartialEq, EnumIs, EnumTryAs)]
pub enum ConstantValue {
    Int(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldModel {
    pub access: AccessFlags,
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
    pub value: Option<ConstantValue>,
    pub metadata: MemberMetadata,
}

impl FieldModel {
    pub fn new(
        access: AccessFlags,
        name: impl Into<String>,
        descriptor: impl Into<String>,
        signature: Option<String>,
        value: Option<ConstantValue>,
    ) -> Self {
        Self::with_policy(access, name, descriptor, signature, value, ReplacePolicy::default())
    }

    pub(crate) fn with_policy(
        access: AccessFlags,
        name: impl Into<String>,
        descriptor: impl Into<String>,
        signature: Option<String>,
        value: Option<ConstantValue>,
        policy: ReplacePolicy,
    ) -> Self {
        Self {
            access,
            name: name.into(),
            descriptor: descriptor.into(),
            signature,
            value,
            metadata: MemberMetadata::new(policy),
        }
    }

    pub fn annotation(&self, descriptor: &str) -> Option<&AnnotationModel> {
        self.metadata.annotation(descriptor)
    }

    pub(crate) fn apply_policy(&mut self, policy: ReplacePolicy) {
        self.metadata.apply_policy(policy);
    }

    pub fn check(&self, tier: Tier) -> CheckResult {
        self.metadata.check_type_annotations(tier, &self.name)?;
        self.metadata.check_children(tier)
    }

    /// Declares this field on `sink` and, unless the sink declines, replays its metadata.
    pub fn accept<S: ClassSink + ?Sized>(&self, sink: &mut S) {
        let field_sink = sink.add_field(
            self.access,
            &self.name,
            &self.descriptor,
            self.signature.as_deref(),
            self.value.as_ref(),
        );
        let Some(field_sink) = field_sink else {
            trace!("interior of field `{}` pruned by sink", self.name);
            return;
        };
        self.metadata.replay(field_sink);
        field_sink.end();
    }
}

impl_member_sink!(FieldModel);

impl FieldSink for FieldModel {}
