//! Module dependency listing.
//!
//! A deliberately small directed graph over installable modules: explicit
//! nodes and edges, an equality-based upgrade predicate, and an indented
//! listing of a module's dependency tree. There is no resolution algorithm
//! here and none is intended.

use indexmap::IndexMap;
use std::collections::HashSet;

/// One installable module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
	name: String,
	version: Option<String>,
	installed_version: Option<String>,
	installed: bool,
	removable: bool,
	depends: Vec<String>,
}

impl Module {
	/// Creates a module that is not installed and depends on nothing.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			version: None,
			installed_version: None,
			installed: false,
			removable: false,
			depends: Vec::new(),
		}
	}

	/// Sets the available version, builder style.
	pub fn with_version(mut self, version: impl Into<String>) -> Self {
		self.version = Some(version.into());
		self
	}

	/// Sets the installed version, builder style.
	pub fn with_installed_version(mut self, version: impl Into<String>) -> Self {
		self.installed_version = Some(version.into());
		self
	}

	/// Marks the module installed, builder style.
	pub fn installed(mut self, installed: bool) -> Self {
		self.installed = installed;
		self
	}

	/// Marks the module removable, builder style.
	pub fn removable(mut self, removable: bool) -> Self {
		self.removable = removable;
		self
	}

	/// Returns the module name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the available version, if known.
	pub fn version(&self) -> Option<&str> {
		self.version.as_deref()
	}

	/// Returns the installed version, if any.
	pub fn installed_version(&self) -> Option<&str> {
		self.installed_version.as_deref()
	}

	/// Returns true if the module is installed.
	pub fn is_installed(&self) -> bool {
		self.installed
	}

	/// Returns true if the module may be removed.
	pub fn is_removable(&self) -> bool {
		self.removable
	}

	/// Returns the names of modules this module depends on.
	pub fn depends(&self) -> &[String] {
		&self.depends
	}

	/// An installed module is upgradable exactly when its available
	/// version differs from its installed version.
	///
	/// # Examples
	///
	/// ```
	/// use yaml_fixtures::modules::Module;
	///
	/// let module = Module::new("crm")
	/// 	.with_version("1.1")
	/// 	.with_installed_version("1.0")
	/// 	.installed(true);
	/// assert!(module.is_upgradable());
	///
	/// let current = Module::new("sales")
	/// 	.with_version("1.0")
	/// 	.with_installed_version("1.0")
	/// 	.installed(true);
	/// assert!(!current.is_upgradable());
	/// ```
	pub fn is_upgradable(&self) -> bool {
		self.installed && self.version != self.installed_version
	}
}

/// Directed dependency graph over modules, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
	modules: IndexMap<String, Module>,
}

impl ModuleGraph {
	/// Creates an empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a module, replacing any module with the same name.
	pub fn insert(&mut self, module: Module) {
		self.modules.insert(module.name.clone(), module);
	}

	/// Records that `name` depends on `dependency`. Adding the same edge
	/// twice has no effect.
	pub fn depends_on(&mut self, name: &str, dependency: &str) {
		if let Some(module) = self.modules.get_mut(name) {
			if !module.depends.iter().any(|d| d == dependency) {
				module.depends.push(dependency.to_string());
			}
		}
	}

	/// Returns the module with the given name, if present.
	pub fn get(&self, name: &str) -> Option<&Module> {
		self.modules.get(name)
	}

	/// Returns all module names in insertion order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.modules.keys().map(|name| name.as_str())
	}

	/// Returns the number of modules.
	pub fn len(&self) -> usize {
		self.modules.len()
	}

	/// Returns true if the graph holds no modules.
	pub fn is_empty(&self) -> bool {
		self.modules.is_empty()
	}

	/// Renders a module's dependency tree, one module per line with `-> `
	/// markers at increasing indentation.
	pub fn pretty_print(&self, name: &str) -> String {
		let mut visited = HashSet::new();
		self.pretty_print_at(name, 1, &mut visited)
	}

	fn pretty_print_at(&self, name: &str, depth: usize, visited: &mut HashSet<String>) -> String {
		let mut out = String::from(name);
		out.push('\n');
		if !visited.insert(name.to_string()) {
			return out;
		}
		if let Some(module) = self.modules.get(name) {
			for dependency in &module.depends {
				out.push_str(&"  ".repeat(depth));
				out.push_str("-> ");
				out.push_str(&self.pretty_print_at(dependency, depth + 1, visited));
			}
		}
		out
	}
}
