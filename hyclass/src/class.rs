//! The root of the tree: one compiled class.
use log::trace;

use crate::{
    access::AccessFlags,
    annotation::AnnotationModel,
    config::ModelConfig,
    error::CheckResult,
    field::{ConstantValue, FieldModel},
    metadata::{MemberMetadata, impl_member_sink},
    method::{MethodKey, MethodModel},
    module::ModuleModel,
    record::RecordComponentModel,
    sink::{ClassSink, FieldSink, MethodSink, ModuleSink, RecordComponentSink},
    table::{LazyList, OrderedTable},
    tier::{self, Feature, Tier},
};

/// Enclosing class of a local or anonymous class, with the enclosing method if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OuterClass {
    pub owner: String,
    pub method_name: Option<String>,
    pub method_descriptor: Option<String>,
}

/// Entry of the inner class table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerClassRef {
    pub name: String,
    pub outer_name: Option<String>,
    pub inner_name: Option<String>,
    pub access: AccessFlags,
}

impl InnerClassRef {
    pub fn accept<S: ClassSink + ?Sized>(&self, sink: &mut S) {
        sink.add_inner_class_ref(
            &self.name,
            self.outer_name.as_deref(),
            self.inner_name.as_deref(),
            self.access,
        );
    }
}

/// A compiled class.
///
/// Fields are keyed by name and methods by [`MethodKey`]. Adding an entry with
/// a key that is already present replaces the existing entry; where the
/// replacement lands is decided by [`ModelConfig::replace_policy`]. All other
/// collections keep every entry in insertion order.
///
/// The model absorbs construction calls through its [`ClassSink`]
/// implementation and replays its current state with [`ClassModel::accept`].
///
/// Equality compares the class structure only; the [`ModelConfig`] is ignored.
#[derive(Debug, Clone)]
pub struct ClassModel {
    /// Class file version, minor version in the 16 most significant bits.
    pub version: u32,
    pub access: AccessFlags,
    pub name: String,
    pub signature: Option<String>,
    pub super_name: Option<String>,
    /// May contain duplicates, nothing in the format forbids them.
    pub interfaces: Vec<String>,
    pub source_file: Option<String>,
    pub source_debug: Option<String>,
    pub module: Option<ModuleModel>,
    pub outer_class: Option<OuterClass>,
    pub nest_host: Option<String>,
    pub metadata: MemberMetadata,
    pub nest_members: LazyList<String>,
    /// Only valid at [`Tier::Experimental`].
    pub permitted_subtypes: LazyList<String>,
    pub inner_classes: Vec<InnerClassRef>,
    pub record_components: LazyList<RecordComponentModel>,
    pub fields: OrderedTable<String, FieldModel>,
    pub methods: OrderedTable<MethodKey, MethodModel>,
    config: ModelConfig,
}

impl Default for ClassModel {
    fn default() -> Self {
        Self::with_config(ModelConfig::default())
    }
}

impl PartialEq for ClassModel {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.access == other.access
            && self.name == other.name
            && self.signature == other.signature
            && self.super_name == other.super_name
            && self.interfaces == other.interfaces
            && self.source_file == other.source_file
            && self.source_debug == other.source_debug
            && self.module == other.module
            && self.outer_class == other.outer_class
            && self.nest_host == other.nest_host
            && self.metadata == other.metadata
            && self.nest_members == other.nest_members
            && self.permitted_subtypes == other.permitted_subtypes
            && self.inner_classes == other.inner_classes
            && self.record_components == other.record_components
            && self.fields == other.fields
            && self.methods == other.methods
    }
}

impl ClassModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ModelConfig) -> Self {
        let policy = config.replace_policy;
        Self {
            version: 0,
            access: AccessFlags::empty(),
            name: String::new(),
            signature: None,
            super_name: None,
            interfaces: Vec::new(),
            source_file: None,
            source_debug: None,
            module: None,
            outer_class: None,
            nest_host: None,
            metadata: MemberMetadata::new(policy),
            nest_members: LazyList::new(),
            permitted_subtypes: LazyList::new(),
            inner_classes: Vec::new(),
            record_components: LazyList::new(),
            fields: OrderedTable::new(policy),
            methods: OrderedTable::new(policy),
            config,
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn annotation(&self, descriptor: &str) -> Option<&AnnotationModel> {
        self.metadata.annotation(descriptor)
    }

    pub fn insert_annotation(&mut self, annotation: AnnotationModel) -> Option<AnnotationModel> {
        self.metadata.insert_annotation(annotation)
    }

    pub fn remove_annotation(&mut self, descriptor: &str) -> Option<AnnotationModel> {
        self.metadata.remove_annotation(descriptor)
    }

    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.get(name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldModel> {
        self.fields.get_mut(name)
    }

    /// Insert a prebuilt field, returning the field it replaced.
    ///
    /// The field and everything below it take over the replace policy of this class.
    pub fn insert_field(&mut self, mut field: FieldModel) -> Option<FieldModel> {
        field.apply_policy(self.config.replace_policy);
        self.fields.upsert(field.name.clone(), field).1
    }

    pub fn remove_field(&mut self, name: &str) -> Option<FieldModel> {
        self.fields.remove(name)
    }

    pub fn method(&self, key: &MethodKey) -> Option<&MethodModel> {
        self.methods.get(key)
    }

    pub fn method_mut(&mut self, key: &MethodKey) -> Option<&mut MethodModel> {
        self.methods.get_mut(key)
    }

    /// Insert a prebuilt method, returning the method it replaced.
    ///
    /// The method and everything below it take over the replace policy of this class.
    pub fn insert_method(&mut self, mut method: MethodModel) -> Option<MethodModel> {
        method.apply_policy(self.config.replace_policy);
        self.methods.upsert(method.key(), method).1
    }

    pub fn remove_method(&mut self, key: &MethodKey) -> Option<MethodModel> {
        self.methods.remove(key)
    }

    /// Checks that nothing in this class or below it needs a tier above `tier`.
    ///
    /// Local features are tested first, in this order: permitted subtypes,
    /// records, nesting, module, type annotations. The permitted subtype,
    /// record component and nest member lists count as present once
    /// allocated, even if emptied afterwards. Then the walk descends into
    /// annotations (map order), visible and invisible type annotations (each
    /// from last to first), record components (last to first), fields and
    /// methods (insertion order). The first violation ends the walk.
    pub fn check(&self, tier: Tier) -> CheckResult {
        let owner = self.name.as_str();
        tier::require(
            tier,
            Feature::PermittedSubtypes,
            self.permitted_subtypes.is_allocated(),
            owner,
        )?;
        tier::require(
            tier,
            Feature::Records,
            self.access.contains(AccessFlags::RECORD) || self.record_components.is_allocated(),
            owner,
        )?;
        tier::require(
            tier,
            Feature::Nesting,
            self.nest_host.is_some() || self.nest_members.is_allocated(),
            owner,
        )?;
        tier::require(tier, Feature::Modules, self.module.is_some(), owner)?;
        self.metadata.check_type_annotations(tier, owner)?;

        self.metadata.check_children(tier)?;
        for component in self.record_components.iter().rev() {
            component.check(tier)?;
        }
        for field in self.fields.values() {
            field.check(tier)?;
        }
        for method in self.methods.values() {
            method.check(tier)?;
        }
        Ok(())
    }

    /// [`check`](Self::check) against the configured default tier.
    pub fn check_default(&self) -> CheckResult {
        self.check(self.config.default_tier)
    }

    /// Replays the current state of the class into `sink`.
    ///
    /// Order: header, source (when either string is set), module, nest host,
    /// outer class, annotations, visible type annotations, invisible type
    /// annotations, extension blocks, nest members, permitted subtypes, inner
    /// classes, record components, fields, methods, end. Whenever the sink
    /// returns no child sink, the interior of that child is skipped.
    pub fn accept<S: ClassSink + ?Sized>(&self, sink: &mut S) {
        sink.begin_header(
            self.version,
            self.access,
            &self.name,
            self.signature.as_deref(),
            self.super_name.as_deref(),
            &self.interfaces,
        );
        if self.source_file.is_some() || self.source_debug.is_some() {
            sink.set_source(self.source_file.as_deref(), self.source_debug.as_deref());
        }
        if let Some(module) = &self.module {
            module.accept(sink);
        }
        if let Some(nest_host) = &self.nest_host {
            sink.set_nest_host(nest_host);
        }
        if let Some(outer) = &self.outer_class {
            sink.set_outer_class(
                &outer.owner,
                outer.method_name.as_deref(),
                outer.method_descriptor.as_deref(),
            );
        }
        self.metadata.replay(sink);
        for nest_member in &self.nest_members {
            sink.add_nest_member(nest_member);
        }
        for permitted_subtype in &self.permitted_subtypes {
            sink.add_permitted_subtype(permitted_subtype);
        }
        for inner_class in &self.inner_classes {
            inner_class.accept(sink);
        }
        for component in &self.record_components {
            component.accept(sink);
        }
        for field in self.fields.values() {
            field.accept(sink);
        }
        for method in self.methods.values() {
            method.accept(sink);
        }
        sink.end();
    }
}

impl_member_sink!(ClassModel);

impl ClassSink for ClassModel {
    fn begin_header(
        &mut self,
        version: u32,
        access: AccessFlags,
        name: &str,
        signature: Option<&str>,
        super_name: Option<&str>,
        interfaces: &[String],
    ) {
        self.version = version;
        self.access = access;
        self.name = name.to_owned();
        self.signature = signature.map(str::to_owned);
        self.super_name = super_name.map(str::to_owned);
        self.interfaces = interfaces.to_vec();
    }

    fn set_source(&mut self, file: Option<&str>, debug: Option<&str>) {
        self.source_file = file.map(str::to_owned);
        self.source_debug = debug.map(str::to_owned);
    }

    fn begin_module(
        &mut self,
        name: &str,
        access: AccessFlags,
        version: Option<&str>,
    ) -> Option<&mut dyn ModuleSink> {
        let module = ModuleModel::new(name, access, version.map(str::to_owned));
        Some(self.module.insert(module))
    }

    fn set_nest_host(&mut self, nest_host: &str) {
        self.nest_host = Some(nest_host.to_owned());
    }

    fn set_outer_class(
        &mut self,
        owner: &str,
        method_name: Option<&str>,
        method_descriptor: Option<&str>,
    ) {
        self.outer_class = Some(OuterClass {
            owner: owner.to_owned(),
            method_name: method_name.map(str::to_owned),
            method_descriptor: method_descriptor.map(str::to_owned),
        });
    }

    fn add_nest_member(&mut self, nest_member: &str) {
        self.nest_members.push(nest_member.to_owned());
    }

    fn add_permitted_subtype(&mut self, permitted_subtype: &str) {
        self.permitted_subtypes.push(permitted_subtype.to_owned());
    }

    fn add_inner_class_ref(
        &mut self,
        name: &str,
        outer_name: Option<&str>,
        inner_name: Option<&str>,
        access: AccessFlags,
    ) {
        self.inner_classes.push(InnerClassRef {
            name: name.to_owned(),
            outer_name: outer_name.map(str::to_owned),
            inner_name: inner_name.map(str::to_owned),
            access,
        });
    }

    fn add_record_component(
        &mut self,
        name: &str,
        descriptor: &str,
        signature: Option<&str>,
    ) -> Option<&mut dyn RecordComponentSink> {
        let component = RecordComponentModel::with_policy(
            name,
            descriptor,
            signature.map(str::to_owned),
            self.config.replace_policy,
        );
        Some(self.record_components.push(component))
    }

    fn add_field(
        &mut self,
        access: AccessFlags,
        name: &str,
        descriptor: &str,
        signature: Option<&str>,
        value: Option<&ConstantValue>,
    ) -> Option<&mut dyn FieldSink> {
        let field = FieldModel::with_policy(
            access,
            name,
            descriptor,
            signature.map(str::to_owned),
            value.cloned(),
            self.config.replace_policy,
        );
        let (slot, previous) = self.fields.upsert(name.to_owned(), field);
        if previous.is_some() {
            trace!("field `{name}` of `{}` replaced", self.name);
        }
        Some(slot)
    }

    fn add_method(
        &mut self,
        access: AccessFlags,
        name: &str,
        descriptor: &str,
        signature: Option<&str>,
        exceptions: &[String],
    ) -> Option<&mut dyn MethodSink> {
        let method = MethodModel::with_policy(
            access,
            name,
            descriptor,
            signature.map(str::to_owned),
            exceptions.to_vec(),
            self.config.replace_policy,
        );
        let (slot, previous) = self.methods.upsert(MethodKey::new(name, descriptor), method);
        if previous.is_some() {
            trace!("method `{name}{descriptor}` of `{}` replaced", self.name);
        }
        Some(slot)
    }
}
