//! Compile-and-render engine for hypermedia link templates.
//!
//! A link template is a URI pattern such as `/people/{id}/orders` together
//! with descriptors saying which arguments of an operation feed which
//! placeholders and query parameters. This crate compiles each template once
//! into a list of components, caches it per operation, and renders links
//! from invocation arguments without re-parsing the pattern.
//!
//! # Overview
//!
//! ```text
//! Invocation ──► Linker ──► TemplateCache ──miss──► OperationInspector
//!                   │             │                        │
//!                   │             └──── TemplateCompiler ◄─┘
//!                   ▼
//!        base URI + CompiledTemplate::render ──► "http://host/people/42?page=2"
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use link_template::{DeclaredType, Invocation, Linker, MappingRegistry, OperationMapping};
//!
//! struct People;
//!
//! let registry = MappingRegistry::new()
//!     .with_type::<People>("/people")
//!     .with_operation::<People>(
//!         "show",
//!         OperationMapping::new("/{id}/orders")
//!             .path_param("id", DeclaredType::Long, 0)
//!             .query_param("page", DeclaredType::Int, 1),
//!     );
//!
//! let linker = Linker::builder()
//!     .base("http://localhost:8080")
//!     .inspector(registry)
//!     .build();
//!
//! let link = linker
//!     .render(&Invocation::of::<People>("show").with_arguments([42, 2]))
//!     .unwrap();
//! assert_eq!(link, "http://localhost:8080/people/42/orders?page=2");
//! ```
//!
//! # Binding Rules
//!
//! | Source | Binds | Encoding |
//! |--------|-------|----------|
//! | Positional value | next placeholder, whatever its name | validated, never escaped |
//! | Path parameter | placeholder with the same name | by declared type |
//! | Query parameter | `name=value`, omitted when null | by declared type |
//!
//! Strings, enums, booleans and integers are validated against the target
//! context and rejected if they hold a character it does not allow. Other
//! declared types go through [`Conversions`] and are percent-encoded. Maps
//! are never encodable.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod base_uri;
mod builder;
mod cache;
mod char_class;
mod compiler;
mod component;
mod constants;
mod conversion;
mod declared_type;
mod encoder;
mod error;
mod inspector;
mod invocation;
#[cfg(kani)]
mod kani_impls;
mod linker;
mod pattern;
pub mod prelude;
mod template;
mod value;

pub use base_uri::{BaseUriProvider, FixedBaseUri};
pub use builder::{Empty, LinkerBuilder, Ready};
pub use cache::{TemplateCache, TemplateKey};
pub use char_class::{UriContext, is_pchar, is_sub_delimiter, is_unreserved};
pub use compiler::TemplateCompiler;
pub use component::{Accessor, Component, PathVariable, QueryVariable, StaticPart};
pub use constants::{
    CONSTRAINT_SEPARATOR, LIST_SEPARATOR, NAME_VALUE_SEPARATOR, PAIR_SEPARATOR, PLACEHOLDER_CLOSE,
    PLACEHOLDER_OPEN, QUERY_START,
};
pub use conversion::{ConversionFn, Conversions};
pub use declared_type::{DeclaredType, EncoderKind};
pub use encoder::ValueEncoder;
pub use error::{CompileError, EncodeError, RenderError};
pub use inspector::{MappingRegistry, OperationInspector, OperationMapping, ParameterDescriptor};
pub use invocation::{DeclaringType, Invocation, OperationId};
pub use linker::Linker;
pub use pattern::{ParsedPattern, Placeholder};
pub use template::CompiledTemplate;
pub use value::{EnumValue, Value};
