mod entry;
mod loader;
mod local;

pub use entry::EntryKind;
pub use loader::{Bindings, Loaded, ModuleLoader, TemplateLoader};
pub use local::LocalFS;
