use std::fmt;

use log::trace;

use crate::{
    access::AccessFlags,
    annotation::{AnnotationValue, ValueArray},
    config::ReplacePolicy,
    error::CheckResult,
    extension::BodyHandle,
    metadata::{MemberMetadata, impl_member_sink},
    sink::{AnnotationSink, ClassSink, MethodSink},
    table::LazyList,
    tier::{self, Feature, Tier},
};

/// Identity of a method within its class: overloads differ by descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodKey {
    pub name: String,
    pub descriptor: String,
}

impl MethodKey {
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.descriptor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterModel {
    pub name: Option<String>,
    pub access: AccessFlags,
}

/// A method declaration. The instruction body is carried as an opaque
/// [`BodyHandle`] and never inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodModel {
    pub access: AccessFlags,
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
    pub exceptions: Vec<String>,
    pub parameters: LazyList<ParameterModel>,
    /// Default value of an annotation interface element, as a single unnamed value.
    pub annotation_default: Option<ValueArray>,
    pub metadata: MemberMetadata,
    pub body: Option<BodyHandle>,
}

impl MethodModel {
    pub fn new(
        access: AccessFlags,
        name: impl Into<String>,
        descriptor: impl Into<String>,
        signature: Option<String>,
        exceptions: Vec<String>,
    ) -> Self {
        Self::with_policy(access, name, descriptor, signature, exceptions, ReplacePolicy::default())
    }

    pub(crate) fn with_policy(
        access: AccessFlags,
        name: impl Into<String>,
        descriptor: impl Into<String>,
        signature: Option<String>,
        exceptions: Vec<String>,
        policy: ReplacePolicy,
    ) -> Self {
        Self {
            access,
            name: name.into(),
            descriptor: descriptor.into(),
            signature,
            exceptions,
            parameters: LazyList::new(),
            annotation_default: None,
            metadata: MemberMetadata::new(policy),
            body: None,
        }
    }

    pub fn key(&self) -> MethodKey {
        MethodKey::new(self.name.clone(), self.descriptor.clone())
    }

    pub fn annotation_default_value(&self) -> Option<&AnnotationValue> {
        self.annotation_default.as_ref()?.values.first()
    }

    pub(crate) fn apply_policy(&mut self, policy: ReplacePolicy) {
        self.metadata.apply_policy(policy);
        if let Some(default) = &mut self.annotation_default {
            default.apply_policy(policy);
        }
    }

    /// Parameters and type annotations are gated; the body is not looked at.
    pub fn check(&self, tier: Tier) -> CheckResult {
        tier::require(tier, Feature::MethodParameters, !self.parameters.is_empty(), &self.name)?;
        self.metadata.check_type_annotations(tier, &self.name)?;
        self.metadata.check_children(tier)?;
        if let Some(default) = &self.annotation_default {
            default.check(tier)?;
        }
        Ok(())
    }

    /// Declares this method on `sink` and, unless the sink declines, replays
    /// parameters, annotation default, metadata and body.
    pub fn accept<S: ClassSink + ?Sized>(&self, sink: &mut S) {
        let method_sink = sink.add_method(
            self.access,
            &self.name,
            &self.descriptor,
            self.signature.as_deref(),
            &self.exceptions,
        );
        let Some(method_sink) = method_sink else {
            trace!("interior of method `{}{}` pruned by sink", self.name, self.descriptor);
            return;
        };
        for parameter in &self.parameters {
            method_sink.add_parameter(parameter.name.as_deref(), parameter.access);
        }
        if let Some(default) = &self.annotation_default {
            if let Some(default_sink) = method_sink.add_annotation_default() {
                default.accept(default_sink);
            }
        }
        self.metadata.replay(method_sink);
        if let Some(body) = &self.body {
            method_sink.set_body(body);
        }
        method_sink.end();
    }
}

impl_member_sink!(MethodModel);

impl MethodSink for MethodModel {
    fn add_parameter(&mut self, name: Option<&str>, access: AccessFlags) {
        self.parameters.push(ParameterModel {
            name: name.map(str::to_owned),
            access,
        });
    }

    fn add_annotation_default(&mut self) -> Option<&mut dyn AnnotationSink> {
        let default = ValueArray::with_policy(self.metadata.annotations.policy());
        Some(self.annotation_default.insert(default))
    }

    fn set_body(&mut self, body: &BodyHandle) {
        self.body = Some(body.clone());
    }
}
