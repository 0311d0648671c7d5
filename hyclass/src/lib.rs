//! Mutable tree model of compiled classes.
//!
//! A [`ClassModel`](class::ClassModel) is built by pushing an ordered sequence of
//! construction calls into it (it implements [`ClassSink`](sink::ClassSink)),
//! can be freely edited afterwards, and replays its whole state into any other
//! sink through [`ClassModel::accept`](class::ClassModel::accept). The replay
//! target may be another model, an encoder or a filtering adapter.
//!
//! Each entity also carries a `check` method walking the tree in a fixed order
//! and reporting whether it uses a feature unavailable at a given
//! [`Tier`](tier::Tier).
//!
//! ```
//! use hyclass::{AccessFlags, ClassModel, ClassSink, ConstantValue, MemberSink, Tier};
//!
//! let mut class = ClassModel::default();
//! class.begin_header(61, AccessFlags::PUBLIC, "demo/Point", None, Some("java/lang/Object"), &[]);
//! let value = ConstantValue::Int(1);
//! if let Some(field) = class.add_field(AccessFlags::PRIVATE, "x", "I", None, Some(&value)) {
//!     field.end();
//! }
//! class.end();
//!
//! let mut copy = ClassModel::default();
//! class.accept(&mut copy);
//! assert_eq!(copy, class);
//! assert!(class.check(Tier::V4).is_ok());
//! ```

pub mod access;
pub mod annotation;
pub mod class;
pub mod config;
pub mod error;
pub mod extension;
pub mod field;
pub mod metadata;
pub mod method;
pub mod module;
pub mod record;
pub mod sink;
pub mod table;
pub mod tier;

pub use access::AccessFlags;
pub use annotation::{AnnotationModel, AnnotationValue, TypeAnnotationModel, TypePath, ValueArray};
pub use class::{ClassModel, InnerClassRef, OuterClass};
pub use config::{ModelConfig, ReplacePolicy};
pub use error::{CheckResult, ConfigError, Error};
pub use extension::{BodyHandle, ExtensionBlock, MethodBody};
pub use field::{ConstantValue, FieldModel};
pub use method::{MethodKey, MethodModel, ParameterModel};
pub use module::ModuleModel;
pub use record::RecordComponentModel;
pub use sink::{
    AnnotationSink, ClassSink, FieldSink, MemberSink, MethodSink, ModuleSink, RecordComponentSink,
};
pub use tier::{Feature, Tier};
