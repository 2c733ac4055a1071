pub mod books;

use std::sync::Arc;

use bookshelf_kernel::ModuleRegistry;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry) {
    let repository: books::SharedBookRepository = Arc::new(books::InMemoryBookRepository::new());
    registry.register(books::create_module(repository));
}
