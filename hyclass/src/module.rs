//! Module descriptor carried by a `module-info` class.
use log::trace;

use crate::{
    access::AccessFlags,
    sink::{ClassSink, ModuleSink},
    table::LazyList,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRequire {
    pub module: String,
    pub access: AccessFlags,
    pub version: Option<String>,
}

/// An exported or opened package, optionally restricted to some modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePackageGrant {
    pub package: String,
    pub access: AccessFlags,
    pub modules: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleProvide {
    pub service: String,
    pub providers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleModel {
    pub name: String,
    pub access: AccessFlags,
    pub version: Option<String>,
    pub main_class: Option<String>,
    pub packages: LazyList<String>,
    pub requires: LazyList<ModuleRequire>,
    pub exports: LazyList<ModulePackageGrant>,
    pub opens: LazyList<ModulePackageGrant>,
    pub uses: LazyList<String>,
    pub provides: LazyList<ModuleProvide>,
}

impl ModuleModel {
    pub fn new(name: impl Into<String>, access: AccessFlags, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            access,
            version,
            main_class: None,
            packages: LazyList::new(),
            requires: LazyList::new(),
            exports: LazyList::new(),
            opens: LazyList::new(),
            uses: LazyList::new(),
            provides: LazyList::new(),
        }
    }

    /// Declares the module on `sink` and replays its directives unless the sink declines.
    pub fn accept<S: ClassSink + ?Sized>(&self, sink: &mut S) {
        match sink.begin_module(&self.name, self.access, self.version.as_deref()) {
            Some(module_sink) => self.replay(module_sink),
            None => trace!("interior of module `{}` pruned by sink", self.name),
        }
    }

    fn replay(&self, sink: &mut dyn ModuleSink) {
        if let Some(main_class) = &self.main_class {
            sink.set_main_class(main_class);
        }
        for package in &self.packages {
            sink.add_package(package);
        }
        for require in &self.requires {
            sink.add_require(&require.module, require.access, require.version.as_deref());
        }
        for export in &self.exports {
            sink.add_export(&export.package, export.access, &export.modules);
        }
        for open in &self.opens {
            sink.add_open(&open.package, open.access, &open.modules);
        }
        for service in &self.uses {
            sink.add_use(service);
        }
        for provide in &self.provides {
            sink.add_provide(&provide.service, &provide.providers);
        }
        sink.end();
    }
}

impl ModuleSink for ModuleModel {
    fn set_main_class(&mut self, main_class: &str) {
        self.main_class = Some(main_class.to_owned());
    }

    fn add_package(&mut self, package: &str) {
        self.packages.push(package.to_owned());
    }

    fn add_require(&mut self, module: &str, access: AccessFlags, version: Option<&str>) {
        self.requires.push(ModuleRequire {
            module: module.to_owned(),
            access,
            version: version.map(str::to_owned),
        });
    }

    fn add_export(&mut self, package: &str, access: AccessFlags, modules: &[String]) {
        self.exports.push(ModulePackageGrant {
            package: package.to_owned(),
            access,
            modules: modules.to_vec(),
        });
    }

    fn add_open(&mut self, package: &str, access: AccessFlags, modules: &[String]) {
        self.opens.push(ModulePackageGrant {
            package: package.to_owned(),
            access,
            modules: modules.to_vec(),
        });
    }

    fn add_use(&mut self, service: &str) {
        self.uses.push(service.to_owned());
    }

    fn add_provide(&mut self, service: &str, providers: &[String]) {
        self.provides.push(ModuleProvide {
            service: service.to_owned(),
            providers: providers.to_vec(),
        });
    }
}
