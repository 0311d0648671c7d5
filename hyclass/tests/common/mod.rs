#![allow(dead_code)]

use hyclass::{
    AccessFlags, AnnotationSink, AnnotationValue, BodyHandle, ClassModel, ClassSink, ConstantValue,
    ExtensionBlock, FieldSink, MemberSink, MethodBody, MethodSink, ModuleSink, RecordComponentSink,
    TypePath,
};

#[derive(Debug)]
pub struct FakeCode(pub Vec<u8>);

impl MethodBody for FakeCode {}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// A class using every part of the model.
pub fn sample_class() -> ClassModel {
    sample_class_into(ClassModel::default())
}

pub fn sample_class_into(mut class: ClassModel) -> ClassModel {
    let interfaces = strings(&["java/io/Serializable", "demo/Drawable", "java/io/Serializable"]);
    class.begin_header(
        61,
        AccessFlags::PUBLIC | AccessFlags::SUPER | AccessFlags::RECORD,
        "demo/Shape",
        Some("<T:Ljava/lang/Object;>Ljava/lang/Record;"),
        Some("java/lang/Record"),
        &interfaces,
    );
    class.set_source(Some("Shape.java"), None);
    if let Some(module) = class.begin_module("demo.shapes", AccessFlags::OPEN, Some("1.0")) {
        module.set_main_class("demo/Main");
        module.add_package("demo");
        module.add_require("java.base", AccessFlags::MANDATED, None);
        module.add_export("demo", AccessFlags::empty(), &strings(&["demo.client"]));
        module.add_open("demo.internal", AccessFlags::empty(), &[]);
        module.add_use("demo/spi/Renderer");
        module.add_provide("demo/spi/Renderer", &strings(&["demo/SvgRenderer"]));
        module.end();
    }
    class.set_nest_host("demo/Outer");
    class.set_outer_class("demo/Outer", Some("make"), Some("()Ldemo/Shape;"));

    if let Some(marker) = class.add_annotation("Ldemo/Marker;", true) {
        marker.visit("level", &AnnotationValue::Int(2));
        marker.visit_enum("kind", "Ldemo/Kind;", "SOLID");
        if let Some(tags) = marker.visit_array("tags") {
            tags.visit("", &AnnotationValue::String("round".into()));
            if let Some(nested) = tags.visit_annotation("", "Ldemo/Tag;") {
                nested.visit("weight", &AnnotationValue::Double(0.5));
                nested.visit_end();
            }
            tags.visit_end();
        }
        marker.visit_end();
    }
    let path: TypePath = "[0;".parse().expect("valid type path");
    let non_null = class.add_type_annotation(0x1000_0000, Some(&path), "Ldemo/NonNull;", true);
    if let Some(non_null) = non_null {
        non_null.visit_end();
    }
    if let Some(internal) = class.add_type_annotation(0x1001_0000, None, "Ldemo/Internal;", false) {
        internal.visit("since", &AnnotationValue::Short(3));
        internal.visit_end();
    }
    class.add_extension_block(&ExtensionBlock::new("Custom", vec![1u8, 2, 3]));
    class.add_nest_member("demo/Shape$Corner");
    class.add_permitted_subtype("demo/Circle");
    class.add_inner_class_ref(
        "demo/Shape$Corner",
        Some("demo/Shape"),
        Some("Corner"),
        AccessFlags::PRIVATE | AccessFlags::STATIC,
    );

    if let Some(component) = class.add_record_component("width", "D", None) {
        if let Some(annotation) = component.add_annotation("Ldemo/Positive;", true) {
            annotation.visit_end();
        }
        component.end();
    }

    if let Some(field) = class.add_field(
        AccessFlags::PRIVATE | AccessFlags::FINAL,
        "width",
        "D",
        None,
        None,
    ) {
        field.add_extension_block(&ExtensionBlock::new("FieldExtra", vec![9u8]));
        field.end();
    }
    if let Some(field) = class.add_field(
        AccessFlags::PUBLIC | AccessFlags::STATIC | AccessFlags::FINAL,
        "NAME",
        "Ljava/lang/String;",
        None,
        Some(&ConstantValue::String("shape".into())),
    ) {
        if let Some(annotation) = field.add_annotation("Ldemo/Exported;", false) {
            annotation.visit("value", &AnnotationValue::Boolean(true));
            annotation.visit_end();
        }
        field.end();
    }

    let body = BodyHandle::new(FakeCode(vec![0x2a, 0xb7, 0x00, 0x01, 0xb1]));
    if let Some(method) = class.add_method(AccessFlags::PUBLIC, "<init>", "(D)V", None, &[]) {
        method.add_parameter(Some("width"), AccessFlags::FINAL);
        method.set_body(&body);
        method.end();
    }
    if let Some(method) = class.add_method(
        AccessFlags::PUBLIC,
        "area",
        "()D",
        None,
        &strings(&["java/lang/ArithmeticException"]),
    ) {
        if let Some(annotation) = method.add_annotation("Ljava/lang/Override;", false) {
            annotation.visit_end();
        }
        let unit = method.add_type_annotation(0x1400_0000, None, "Ldemo/Unit;", true);
        if let Some(type_annotation) = unit {
            type_annotation.visit("value", &AnnotationValue::String("m2".into()));
            type_annotation.visit_end();
        }
        method.end();
    }
    if let Some(method) = class.add_method(AccessFlags::PUBLIC, "area", "(I)D", None, &[]) {
        if let Some(default) = method.add_annotation_default() {
            default.visit("", &AnnotationValue::Float(1.5));
            default.visit_end();
        }
        method.end();
    }
    class.end();
    class
}

/// Sink that logs every call it receives and hands itself out as every child sink.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<String>,
}

impl Recorder {
    fn log(&mut self, call: String) {
        self.calls.push(call);
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }
}

impl AnnotationSink for Recorder {
    fn visit(&mut self, name: &str, value: &AnnotationValue) {
        self.log(format!("value {name} {value:?}"));
    }

    fn visit_enum(&mut self, name: &str, descriptor: &str, value: &str) {
        self.log(format!("enum {name} {descriptor} {value}"));
    }

    fn visit_annotation(
        &mut self,
        name: &str,
        descriptor: &str,
    ) -> Option<&mut dyn AnnotationSink> {
        self.log(format!("nested {name} {descriptor}"));
        Some(self)
    }

    fn visit_array(&mut self, name: &str) -> Option<&mut dyn AnnotationSink> {
        self.log(format!("array {name}"));
        Some(self)
    }

    fn visit_end(&mut self) {
        self.log("annotation end".into());
    }
}

impl MemberSink for Recorder {
    fn add_annotation(
        &mut self,
        descriptor: &str,
        visible: bool,
    ) -> Option<&mut dyn AnnotationSink> {
        self.log(format!("annotation {descriptor} {visible}"));
        Some(self)
    }

    fn add_type_annotation(
        &mut self,
        type_ref: u32,
        type_path: Option<&TypePath>,
        descriptor: &str,
        visible: bool,
    ) -> Option<&mut dyn AnnotationSink> {
        let path = type_path.map(ToString::to_string).unwrap_or_default();
        self.log(format!("type annotation {type_ref:#x} {path} {descriptor} {visible}"));
        Some(self)
    }

    fn add_extension_block(&mut self, block: &ExtensionBlock) {
        self.log(format!("extension {}", block.name));
    }

    fn end(&mut self) {
        self.log("end".into());
    }
}

impl FieldSink for Recorder {}

impl RecordComponentSink for Recorder {}

impl MethodSink for Recorder {
    fn add_parameter(&mut self, name: Option<&str>, _access: AccessFlags) {
        self.log(format!("parameter {}", name.unwrap_or("_")));
    }

    fn add_annotation_default(&mut self) -> Option<&mut dyn AnnotationSink> {
        self.log("annotation default".into());
        Some(self)
    }

    fn set_body(&mut self, _body: &BodyHandle) {
        self.log("body".into());
    }
}

impl ModuleSink for Recorder {
    fn set_main_class(&mut self, main_class: &str) {
        self.log(format!("main class {main_class}"));
    }

    fn add_package(&mut self, package: &str) {
        self.log(format!("package {package}"));
    }

    fn add_require(&mut self, module: &str, _access: AccessFlags, _version: Option<&str>) {
        self.log(format!("require {module}"));
    }

    fn add_export(&mut self, package: &str, _access: AccessFlags, _modules: &[String]) {
        self.log(format!("export {package}"));
    }

    fn add_open(&mut self, package: &str, _access: AccessFlags, _modules: &[String]) {
        self.log(format!("open {package}"));
    }

    fn add_use(&mut self, service: &str) {
        self.log(format!("use {service}"));
    }

    fn add_provide(&mut self, service: &str, _providers: &[String]) {
        self.log(format!("provide {service}"));
    }

    fn end(&mut self) {
        self.log("module end".into());
    }
}

impl ClassSink for Recorder {
    fn begin_header(
        &mut self,
        _version: u32,
        _access: AccessFlags,
        name: &str,
        _signature: Option<&str>,
        _super_name: Option<&str>,
        interfaces: &[String],
    ) {
        self.log(format!("header {name} {}", interfaces.join(",")));
    }

    fn set_source(&mut self, file: Option<&str>, debug: Option<&str>) {
        self.log(format!("source {file:?} {debug:?}"));
    }

    fn begin_module(
        &mut self,
        name: &str,
        _access: AccessFlags,
        _version: Option<&str>,
    ) -> Option<&mut dyn ModuleSink> {
        self.log(format!("module {name}"));
        Some(self)
    }

    fn set_nest_host(&mut self, nest_host: &str) {
        self.log(format!("nest host {nest_host}"));
    }

    fn set_outer_class(
        &mut self,
        owner: &str,
        _method_name: Option<&str>,
        _method_descriptor: Option<&str>,
    ) {
        self.log(format!("outer class {owner}"));
    }

    fn add_nest_member(&mut self, nest_member: &str) {
        self.log(format!("nest member {nest_member}"));
    }

    fn add_permitted_subtype(&mut self, permitted_subtype: &str) {
        self.log(format!("permitted subtype {permitted_subtype}"));
    }

    fn add_inner_class_ref(
        &mut self,
        name: &str,
        _outer_name: Option<&str>,
        _inner_name: Option<&str>,
        _access: AccessFlags,
    ) {
        self.log(format!("inner class {name}"));
    }

    fn add_record_component(
        &mut self,
        name: &str,
        _descriptor: &str,
        _signature: Option<&str>,
    ) -> Option<&mut dyn RecordComponentSink> {
        self.log(format!("record component {name}"));
        Some(self)
    }

    fn add_field(
        &mut self,
        _access: AccessFlags,
        name: &str,
        _descriptor: &str,
        _signature: Option<&str>,
        value: Option<&ConstantValue>,
    ) -> Option<&mut dyn FieldSink> {
        self.log(format!("field {name} {value:?}"));
        Some(self)
    }

    fn add_method(
        &mut self,
        _access: AccessFlags,
        name: &str,
        descriptor: &str,
        _signature: Option<&str>,
        _exceptions: &[String],
    ) -> Option<&mut dyn MethodSink> {
        self.log(format!("method {name}{descriptor}"));
        Some(self)
    }
}
