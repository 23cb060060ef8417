//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use link_template::prelude::*;
//!
//! struct Health;
//!
//! let linker = Linker::builder()
//!     .inspector(MappingRegistry::new().with_operation::<Health>("check", OperationMapping::new("/health")))
//!     .build();
//! assert_eq!(linker.render(&Invocation::of::<Health>("check")).unwrap(), "/health");
//! ```
//!
//! Builder state markers (`Empty`, `Ready`) and the component types are left
//! out; they only matter when working with compiled templates directly.

pub use crate::{
    // Entry points
    Invocation, Linker, LinkerBuilder,
    // Operation metadata
    DeclaredType, DeclaringType, MappingRegistry, OperationId, OperationInspector,
    OperationMapping, ParameterDescriptor,
    // Values and encoding
    Conversions, EnumValue, UriContext, Value,
    // Base URI
    BaseUriProvider, FixedBaseUri,
    // Templates
    CompiledTemplate, TemplateCache, TemplateCompiler, TemplateKey,
    // Errors
    CompileError, EncodeError, RenderError,
};
