use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use handlebars::Handlebars;
use serde_json::Value;

use crate::core::Result;
use crate::error::FsError;

/// Name-to-value environment exposed to a module while it evaluates.
pub type Bindings = BTreeMap<String, Value>;

/// Outcome of [`load_module_once`](crate::Filesystem::load_module_once).
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    /// First evaluation of the module, with the value it produced.
    Fresh(Value),
    /// The module was already evaluated by this engine; nothing re-ran.
    Already,
}

/// Evaluates module files on behalf of the engine.
///
/// Module loading is a narrowly-scoped collaborator: the engine checks that
/// the path is a regular file and tracks load-once state, the loader only
/// turns file content plus bindings into a value.
pub trait ModuleLoader {
    fn load(&self, path: &Path, bindings: &Bindings) -> Result<Value>;
}

/// The default loader: renders the file as a Handlebars template against
/// the bindings.
///
/// The rendered output is parsed as JSON when it parses, and wrapped as a
/// JSON string otherwise, so a module can produce structured values or
/// plain text.
#[derive(Debug, Default)]
pub struct TemplateLoader;

impl TemplateLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ModuleLoader for TemplateLoader {
    fn load(&self, path: &Path, bindings: &Bindings) -> Result<Value> {
        let source =
            fs::read_to_string(path).map_err(|e| FsError::from_io("load module", path, e))?;

        let rendered = Handlebars::new()
            .render_template(&source, bindings)
            .map_err(|e| FsError::Module {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(serde_json::from_str(rendered.trim()).unwrap_or(Value::String(rendered)))
    }
}
