pub mod emitters;
pub mod error;
pub mod generator;
pub mod type_mapper;

pub use error::EmitError;
pub use generator::CSharpClientGenerator;
