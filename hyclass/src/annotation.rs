//! Annotations, annotation values and type annotations.
use std::{fmt, str::FromStr};

use log::trace;
use strum::{EnumIs, EnumIter, FromRepr};

use crate::{
    config::ReplacePolicy,
    error::{CheckResult, TypePathError},
    sink::AnnotationSink,
    table::OrderedTable,
    tier::Tier,
};

/// Value of an annotation element.
#[derive(Debug, Clone, PartialEq, EnumIs)]
pub enum AnnotationValue {
    Byte(i8),
    Boolean(bool),
    /// UTF-16 code unit.
    Char(u16),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    /// A class literal, stored as a type descriptor.
    Type(String),
    Enum { descriptor: String, value: String },
    Annotation(AnnotationModel),
    Array(ValueArray),
}

impl AnnotationValue {
    pub fn check(&self, tier: Tier) -> CheckResult {
        match self {
            AnnotationValue::Annotation(annotation) => annotation.check(tier),
            AnnotationValue::Array(array) => array.check(tier),
            _ => Ok(()),
        }
    }

    pub(crate) fn apply_policy(&mut self, policy: ReplacePolicy) {
        match self {
            AnnotationValue::Annotation(annotation) => annotation.apply_policy(policy),
            AnnotationValue::Array(array) => array.apply_policy(policy),
            _ => {}
        }
    }

    /// Replays this value as the element `name` of `sink`.
    pub(crate) fn replay(&self, name: &str, sink: &mut dyn AnnotationSink) {
        match self {
            AnnotationValue::Enum { descriptor, value } => sink.visit_enum(name, descriptor, value),
            AnnotationValue::Annotation(annotation) => {
                if let Some(nested) = sink.visit_annotation(name, &annotation.descriptor) {
                    annotation.accept(nested);
                }
            }
            AnnotationValue::Array(array) => {
                if let Some(elements) = sink.visit_array(name) {
                    array.accept(elements);
                }
            }
            _ => sink.visit(name, self),
        }
    }
}

/// A single annotation: a type descriptor, a visibility flag and its named elements.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationModel {
    pub descriptor: String,
    /// Whether the annotation is retained at runtime. Nested annotations are
    /// always created invisible; the flag has no meaning there.
    pub visible: bool,
    pub values: OrderedTable<String, AnnotationValue>,
}

impl AnnotationModel {
    pub fn new(descriptor: impl Into<String>, visible: bool) -> Self {
        Self::with_policy(descriptor, visible, ReplacePolicy::default())
    }

    pub fn with_policy(
        descriptor: impl Into<String>,
        visible: bool,
        policy: ReplacePolicy,
    ) -> Self {
        Self {
            descriptor: descriptor.into(),
            visible,
            values: OrderedTable::new(policy),
        }
    }

    pub fn value(&self, name: &str) -> Option<&AnnotationValue> {
        self.values.get(name)
    }

    /// Annotations carry no tier-gated shape of their own; this only descends
    /// into nested annotation values, in element order.
    pub fn check(&self, tier: Tier) -> CheckResult {
        for value in self.values.values() {
            value.check(tier)?;
        }
        Ok(())
    }

    /// Replays every element into `sink`, then closes it.
    pub fn accept(&self, sink: &mut dyn AnnotationSink) {
        for (name, value) in &self.values {
            value.replay(name, sink);
        }
        sink.visit_end();
    }

    /// Sets the replace policy of this annotation and of every nested value.
    pub(crate) fn apply_policy(&mut self, policy: ReplacePolicy) {
        self.values.set_policy(policy);
        for value in self.values.values_mut() {
            value.apply_policy(policy);
        }
    }

    fn store(&mut self, name: &str, value: AnnotationValue) -> &mut AnnotationValue {
        let (slot, previous) = self.values.upsert(name.to_owned(), value);
        if previous.is_some() {
            trace!("element `{name}` of `{}` replaced", self.descriptor);
        }
        slot
    }
}

impl AnnotationSink for AnnotationModel {
    fn visit(&mut self, name: &str, value: &AnnotationValue) {
        self.store(name, value.clone());
    }

    fn visit_enum(&mut self, name: &str, descriptor: &str, value: &str) {
        self.store(
            name,
            AnnotationValue::Enum {
                descriptor: descriptor.to_owned(),
                value: value.to_owned(),
            },
        );
    }

    fn visit_annotation(
        &mut self,
        name: &str,
        descriptor: &str,
    ) -> Option<&mut dyn AnnotationSink> {
        let nested = AnnotationModel::with_policy(descriptor, false, self.values.policy());
        match self.store(name, AnnotationValue::Annotation(nested)) {
            AnnotationValue::Annotation(nested) => Some(nested),
            _ => None,
        }
    }

    fn visit_array(&mut self, name: &str) -> Option<&mut dyn AnnotationSink> {
        let array = ValueArray::with_policy(self.values.policy());
        match self.store(name, AnnotationValue::Array(array)) {
            AnnotationValue::Array(array) => Some(array),
            _ => None,
        }
    }
}

/// Elements of an array-valued annotation element.
#[derive(Debug, Clone, Default)]
pub struct ValueArray {
    pub values: Vec<AnnotationValue>,
    policy: ReplacePolicy,
}

impl ValueArray {
    pub fn new(values: Vec<AnnotationValue>) -> Self {
        Self {
            values,
            policy: ReplacePolicy::default(),
        }
    }

    pub(crate) fn with_policy(policy: ReplacePolicy) -> Self {
        Self {
            values: Vec::new(),
            policy,
        }
    }

    pub fn check(&self, tier: Tier) -> CheckResult {
        for value in &self.values {
            value.check(tier)?;
        }
        Ok(())
    }

    pub fn accept(&self, sink: &mut dyn AnnotationSink) {
        for value in &self.values {
            value.replay("", sink);
        }
        sink.visit_end();
    }

    pub(crate) fn apply_policy(&mut self, policy: ReplacePolicy) {
        self.policy = policy;
        for value in &mut self.values {
            value.apply_policy(policy);
        }
    }

    fn push(&mut self, value: AnnotationValue) -> &mut AnnotationValue {
        let index = self.values.len();
        self.values.push(value);
        &mut self.values[index]
    }
}

impl PartialEq for ValueArray {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl AnnotationSink for ValueArray {
    fn visit(&mut self, _name: &str, value: &AnnotationValue) {
        self.push(value.clone());
    }

    fn visit_enum(&mut self, _name: &str, descriptor: &str, value: &str) {
        self.push(AnnotationValue::Enum {
            descriptor: descriptor.to_owned(),
            value: value.to_owned(),
        });
    }

    fn visit_annotation(
        &mut self,
        _name: &str,
        descriptor: &str,
    ) -> Option<&mut dyn AnnotationSink> {
        let nested = AnnotationModel::with_policy(descriptor, false, self.policy);
        match self.push(AnnotationValue::Annotation(nested)) {
            AnnotationValue::Annotation(nested) => Some(nested),
            _ => None,
        }
    }

    fn visit_array(&mut self, _name: &str) -> Option<&mut dyn AnnotationSink> {
        let array = ValueArray::with_policy(self.policy);
        match self.push(AnnotationValue::Array(array)) {
            AnnotationValue::Array(array) => Some(array),
            _ => None,
        }
    }
}

/// An annotation on a type use.
///
/// `type_ref` locates the annotated type within its owner (target kind in the
/// high byte plus target-specific bits); it is stored without interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotationModel {
    pub type_ref: u32,
    pub type_path: Option<TypePath>,
    pub annotation: AnnotationModel,
}

impl TypeAnnotationModel {
    pub fn new(type_ref: u32, type_path: Option<TypePath>, annotation: AnnotationModel) -> Self {
        Self {
            type_ref,
            type_path,
            annotation,
        }
    }

    pub fn check(&self, tier: Tier) -> CheckResult {
        self.annotation.check(tier)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, FromRepr)]
#[repr(u8)]
pub enum TypePathKind {
    ArrayElement = 0,
    InnerType = 1,
    WildcardBound = 2,
    TypeArgument = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypePathStep {
    pub kind: TypePathKind,
    /// Index of the type argument for [`TypePathKind::TypeArgument`], zero otherwise.
    pub argument: u8,
}

/// Path to the annotated part of a type, e.g. the element type of an array or
/// a type argument of a generic type.
///
/// The textual form uses `[` for an array element, `.` for a nested type, `*`
/// for a wildcard bound and `N;` for the type argument at index `N`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TypePath {
    pub steps: Vec<TypePathStep>,
}

impl TypePath {
    pub fn new(steps: Vec<TypePathStep>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl FromStr for TypePath {
    type Err = TypePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut steps = Vec::new();
        let mut chars = s.char_indices().peekable();
        while let Some((position, c)) = chars.next() {
            let step = match c {
                '[' => TypePathKind::ArrayElement,
                '.' => TypePathKind::InnerType,
                '*' => TypePathKind::WildcardBound,
                '0'..='9' => {
                    let mut index = c.to_digit(10).unwrap_or_default();
                    loop {
                        match chars.next() {
                            Some((_, ';')) => break,
                            Some((_, d)) if d.is_ascii_digit() => {
                                index = index * 10 + d.to_digit(10).unwrap_or_default();
                                if index > u8::MAX as u32 {
                                    return Err(TypePathError::ArgumentOutOfRange { index });
                                }
                            }
                            Some((position, found)) => {
                                return Err(TypePathError::UnexpectedCharacter { found, position });
                            }
                            None => return Err(TypePathError::UnterminatedArgument { position }),
                        }
                    }
                    steps.push(TypePathStep {
                        kind: TypePathKind::TypeArgument,
                        argument: index as u8,
                    });
                    continue;
                }
                found => return Err(TypePathError::UnexpectedCharacter { found, position }),
            };
            steps.push(TypePathStep {
                kind: step,
                argument: 0,
            });
        }
        Ok(Self { steps })
    }
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            match step.kind {
                TypePathKind::ArrayElement => write!(f, "[")?,
                TypePathKind::InnerType => write!(f, ".")?,
                TypePathKind::WildcardBound => write!(f, "*")?,
                TypePathKind::TypeArgument => write!(f, "{};", step.argument)?,
            }
        }
        Ok(())
    }
}
