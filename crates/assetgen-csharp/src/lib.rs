pub mod known_types;
pub mod templates;

use assetgen_core::TemplateRegistry;
use log::debug;

pub use templates::SCRIPT_EXTENSION;

/// Register the script templates, in selection order.
pub fn register(registry: &mut TemplateRegistry) {
    use templates::*;

    registry
        .register(&class::DESCRIPTOR, class::create)
        .register(&component::DESCRIPTOR, component::create)
        .register(&scriptable::DESCRIPTOR, scriptable::create)
        .register(&editor::DESCRIPTOR, editor::create)
        .register(&drawer::DESCRIPTOR, drawer::create)
        .register(&window::DESCRIPTOR, window::create)
        .register(&enumeration::DESCRIPTOR, enumeration::create)
        .register(&interface::DESCRIPTOR, interface::create)
        .register(&attribute::DESCRIPTOR, attribute::create)
        .register(&utility::DESCRIPTOR, utility::create);
    debug!("{} templates registered", registry.len());
}
