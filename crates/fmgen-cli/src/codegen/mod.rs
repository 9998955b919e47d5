//! Code generation from struct models.
//!
//! Each directory with surviving structs gets one generated Go file holding a
//! builder per struct:
//!
//! ```text
//! Go source
//!     ↓
//!  [fmgen-core extraction + inclusion policy]
//!     ↓
//!  StructModel list
//!     ↓
//!  [Go generator] → fm_gen.go
//! ```
//!
//! For a struct `S` the generator emits `SBuilder`, a `NewSBuilder`
//! constructor taking every field that is neither skipped nor optional, one
//! `With<Field>` setter per optional field and `Build() S`.
//!
//! ```rust
//! use fmgen_cli::codegen::render_file;
//! use fmgen_core::{FieldDescriptor, StructModel};
//!
//! let model = StructModel {
//!     name: "User".to_string(),
//!     line: 3,
//!     fields: vec![FieldDescriptor {
//!         name: "Name".to_string(),
//!         base_type: "string".to_string(),
//!         is_pointer: false,
//!         is_array: false,
//!         is_optional: false,
//!         is_skipped: false,
//!     }],
//!     comment: None,
//! };
//!
//! let code = render_file("models", &[], &[&model]);
//! assert!(code.contains("func NewUserBuilder(name string) *UserBuilder {"));
//! ```

pub mod go;
pub mod naming;

pub use go::{go_type, render_builder, render_file, write_generated};
