//! Push-style construction protocol.
//!
//! Readers drive a sink with an ordered sequence of calls; models implement
//! every sink trait and so absorb that sequence, and replay it back out through
//! their `accept` methods. Calls that open a nested entity return an optional
//! child sink. Returning `None` is a normal outcome meaning "skip the interior
//! of this entity": the entity itself has been seen, its children are not
//! replayed.
//!
//! Every call has a no-op default, and calls that open a nested entity default
//! to `None`, so adapters only override what they care about.
//!
//! Call order for a class:
//!
//! 1. [`ClassSink::begin_header`]
//! 2. [`ClassSink::set_source`], [`ClassSink::begin_module`],
//!    [`ClassSink::set_nest_host`], [`ClassSink::set_outer_class`]
//! 3. [`MemberSink::add_annotation`], [`MemberSink::add_type_annotation`],
//!    [`MemberSink::add_extension_block`]
//! 4. [`ClassSink::add_nest_member`], [`ClassSink::add_permitted_subtype`],
//!    [`ClassSink::add_inner_class_ref`], [`ClassSink::add_record_component`],
//!    [`ClassSink::add_field`], [`ClassSink::add_method`]
//! 5. [`MemberSink::end`]
use crate::{
    access::AccessFlags,
    annotation::{AnnotationValue, TypePath},
    extension::{BodyHandle, ExtensionBlock},
    field::ConstantValue,
};

/// Receives the elements of one annotation, or the elements of an array value.
///
/// Array sinks ignore element names; replay passes an empty name for them.
pub trait AnnotationSink {
    /// A primitive, string or type value.
    fn visit(&mut self, _name: &str, _value: &AnnotationValue) {}

    fn visit_enum(&mut self, _name: &str, _descriptor: &str, _value: &str) {}

    fn visit_annotation(
        &mut self,
        _name: &str,
        _descriptor: &str,
    ) -> Option<&mut dyn AnnotationSink> {
        None
    }

    fn visit_array(&mut self, _name: &str) -> Option<&mut dyn AnnotationSink> {
        None
    }

    fn visit_end(&mut self) {}
}

/// Metadata calls shared by classes, fields, methods and record components.
pub trait MemberSink {
    /// Annotations are keyed by descriptor alone: a second annotation with the
    /// same descriptor replaces the first whatever its visibility.
    fn add_annotation(
        &mut self,
        _descriptor: &str,
        _visible: bool,
    ) -> Option<&mut dyn AnnotationSink> {
        None
    }

    /// Type annotations are appended to the visible or invisible list and never replace.
    fn add_type_annotation(
        &mut self,
        _type_ref: u32,
        _type_path: Option<&TypePath>,
        _descriptor: &str,
        _visible: bool,
    ) -> Option<&mut dyn AnnotationSink> {
        None
    }

    fn add_extension_block(&mut self, _block: &ExtensionBlock) {}

    /// Closes the entity. Issuing it more than once is harmless.
    fn end(&mut self) {}
}

pub trait FieldSink: MemberSink {}

pub trait RecordComponentSink: MemberSink {}

pub trait MethodSink: MemberSink {
    fn add_parameter(&mut self, _name: Option<&str>, _access: AccessFlags) {}

    /// Opens the default value of an annotation interface element. The sink
    /// receives exactly one unnamed value.
    fn add_annotation_default(&mut self) -> Option<&mut dyn AnnotationSink> {
        None
    }

    fn set_body(&mut self, _body: &BodyHandle) {}
}

pub trait ModuleSink {
    fn set_main_class(&mut self, _main_class: &str) {}

    fn add_package(&mut self, _package: &str) {}

    fn add_require(&mut self, _module: &str, _access: AccessFlags, _version: Option<&str>) {}

    fn add_export(&mut self, _package: &str, _access: AccessFlags, _modules: &[String]) {}

    fn add_open(&mut self, _package: &str, _access: AccessFlags, _modules: &[String]) {}

    fn add_use(&mut self, _service: &str) {}

    fn add_provide(&mut self, _service: &str, _providers: &[String]) {}

    fn end(&mut self) {}
}

pub trait ClassSink: MemberSink {
    fn begin_header(
        &mut self,
        _version: u32,
        _access: AccessFlags,
        _name: &str,
        _signature: Option<&str>,
        _super_name: Option<&str>,
        _interfaces: &[String],
    ) {
    }

    fn set_source(&mut self, _file: Option<&str>, _debug: Option<&str>) {}

    fn begin_module(
        &mut self,
        _name: &str,
        _access: AccessFlags,
        _version: Option<&str>,
    ) -> Option<&mut dyn ModuleSink> {
        None
    }

    fn set_nest_host(&mut self, _nest_host: &str) {}

    fn set_outer_class(
        &mut self,
        _owner: &str,
        _method_name: Option<&str>,
        _method_descriptor: Option<&str>,
    ) {
    }

    fn add_nest_member(&mut self, _nest_member: &str) {}

    /// Accepted at any tier; rejected only by `check`.
    fn add_permitted_subtype(&mut self, _permitted_subtype: &str) {}

    fn add_inner_class_ref(
        &mut self,
        _name: &str,
        _outer_name: Option<&str>,
        _inner_name: Option<&str>,
        _access: AccessFlags,
    ) {
    }

    fn add_record_component(
        &mut self,
        _name: &str,
        _descriptor: &str,
        _signature: Option<&str>,
    ) -> Option<&mut dyn RecordComponentSink> {
        None
    }

    fn add_field(
        &mut self,
        _access: AccessFlags,
        _name: &str,
        _descriptor: &str,
        _signature: Option<&str>,
        _value: Option<&ConstantValue>,
    ) -> Option<&mut dyn FieldSink> {
        None
    }

    fn add_method(
        &mut self,
        _access: AccessFlags,
        _name: &str,
        _descriptor: &str,
        _signature: Option<&str>,
        _exceptions: &[String],
    ) -> Option<&mut dyn MethodSink> {
        None
    }
}
