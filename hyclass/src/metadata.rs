//! Annotation, type annotation and extension block storage shared by every
//! entity that can carry them.
use log::trace;

use crate::{
    annotation::{AnnotationModel, TypeAnnotationModel, TypePath},
    config::ReplacePolicy,
    error::CheckResult,
    extension::ExtensionBlock,
    sink::MemberSink,
    table::{LazyList, OrderedTable},
    tier::{self, Feature, Tier},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberMetadata {
    /// Keyed by descriptor only, see [`MemberSink::add_annotation`].
    pub annotations: OrderedTable<String, AnnotationModel>,
    pub visible_type_annotations: LazyList<TypeAnnotationModel>,
    pub invisible_type_annotations: LazyList<TypeAnnotationModel>,
    pub extension_blocks: LazyList<ExtensionBlock>,
}

impl MemberMetadata {
    pub fn new(policy: ReplacePolicy) -> Self {
        Self {
            annotations: OrderedTable::new(policy),
            ..Default::default()
        }
    }

    pub fn annotation(&self, descriptor: &str) -> Option<&AnnotationModel> {
        self.annotations.get(descriptor)
    }

    /// Insert a prebuilt annotation, returning the one it replaced. The
    /// annotation takes over the replace policy of this metadata.
    pub fn insert_annotation(
        &mut self,
        mut annotation: AnnotationModel,
    ) -> Option<AnnotationModel> {
        annotation.apply_policy(self.annotations.policy());
        self.annotations
            .upsert(annotation.descriptor.clone(), annotation)
            .1
    }

    pub fn remove_annotation(&mut self, descriptor: &str) -> Option<AnnotationModel> {
        self.annotations.remove(descriptor)
    }

    pub fn has_type_annotations(&self) -> bool {
        !self.visible_type_annotations.is_empty() || !self.invisible_type_annotations.is_empty()
    }

    /// Sets the replace policy of every annotation map below this metadata.
    pub(crate) fn apply_policy(&mut self, policy: ReplacePolicy) {
        self.annotations.set_policy(policy);
        for annotation in self.annotations.values_mut() {
            annotation.apply_policy(policy);
        }
        let type_annotations = self
            .visible_type_annotations
            .iter_mut()
            .chain(self.invisible_type_annotations.iter_mut());
        for type_annotation in type_annotations {
            type_annotation.annotation.apply_policy(policy);
        }
    }

    pub(crate) fn add_annotation(
        &mut self,
        descriptor: &str,
        visible: bool,
    ) -> &mut AnnotationModel {
        let policy = self.annotations.policy();
        let annotation = AnnotationModel::with_policy(descriptor, visible, policy);
        let (slot, previous) = self.annotations.upsert(descriptor.to_owned(), annotation);
        if let Some(previous) = previous {
            trace!(
                "annotation `{descriptor}` (visible: {}) replaced by (visible: {visible})",
                previous.visible
            );
        }
        slot
    }

    pub(crate) fn add_type_annotation(
        &mut self,
        type_ref: u32,
        type_path: Option<&TypePath>,
        descriptor: &str,
        visible: bool,
    ) -> &mut AnnotationModel {
        let policy = self.annotations.policy();
        let annotation = AnnotationModel::with_policy(descriptor, visible, policy);
        let entry = TypeAnnotationModel::new(type_ref, type_path.cloned(), annotation);
        let list = if visible {
            &mut self.visible_type_annotations
        } else {
            &mut self.invisible_type_annotations
        };
        &mut list.push(entry).annotation
    }

    pub(crate) fn add_extension_block(&mut self, block: &ExtensionBlock) {
        self.extension_blocks.push(block.clone());
    }

    pub(crate) fn check_type_annotations(&self, tier: Tier, owner: &str) -> CheckResult {
        tier::require(tier, Feature::TypeAnnotations, self.has_type_annotations(), owner)
    }

    /// Descends into annotations in map order, then into visible and invisible
    /// type annotations, each list from its last entry to its first.
    pub(crate) fn check_children(&self, tier: Tier) -> CheckResult {
        for annotation in self.annotations.values() {
            annotation.check(tier)?;
        }
        for type_annotation in self.visible_type_annotations.iter().rev() {
            type_annotation.check(tier)?;
        }
        for type_annotation in self.invisible_type_annotations.iter().rev() {
            type_annotation.check(tier)?;
        }
        Ok(())
    }

    /// Replays annotations, visible type annotations, invisible type
    /// annotations and extension blocks, in that order.
    pub(crate) fn replay<S: MemberSink + ?Sized>(&self, sink: &mut S) {
        for annotation in self.annotations.values() {
            match sink.add_annotation(&annotation.descriptor, annotation.visible) {
                Some(child) => annotation.accept(child),
                None => trace!("annotation `{}` pruned by sink", annotation.descriptor),
            }
        }
        for (list, visible) in [
            (&self.visible_type_annotations, true),
            (&self.invisible_type_annotations, false),
        ] {
            for entry in list {
                let child = sink.add_type_annotation(
                    entry.type_ref,
                    entry.type_path.as_ref(),
                    &entry.annotation.descriptor,
                    visible,
                );
                match child {
                    Some(child) => entry.annotation.accept(child),
                    None => trace!(
                        "type annotation `{}` pruned by sink",
                        entry.annotation.descriptor
                    ),
                }
            }
        }
        for block in &self.extension_blocks {
            sink.add_extension_block(block);
        }
    }
}

/// Implements [`MemberSink`] for a model type holding a `metadata: MemberMetadata` field.
macro_rules! impl_member_sink {
    ($model:ty) => {
        impl $crate::sink::MemberSink for $model {
            fn add_annotation(
                &mut self,
                descriptor: &str,
                visible: bool,
            ) -> Option<&mut dyn $crate::sink::AnnotationSink> {
                Some(self.metadata.add_annotation(descriptor, visible))
            }

            fn add_type_annotation(
                &mut self,
                type_ref: u32,
                type_path: Option<&$crate::annotation::TypePath>,
                descriptor: &str,
                visible: bool,
            ) -> Option<&mut dyn $crate::sink::AnnotationSink> {
                Some(
                    self.metadata
                        .add_type_annotation(type_ref, type_path, descriptor, visible),
                )
            }

            fn add_extension_block(&mut self, block: &$crate::extension::ExtensionBlock) {
                self.metadata.add_extension_block(block);
            }
        }
    };
}

pub(crate) use impl_member_sink;
