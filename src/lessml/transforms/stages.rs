//! Individual transformation stages
//!
//! Each stage implements [Runnable](super::Runnable) for one step of a translation.

pub mod building;
pub mod conversion;
pub mod desugaring;
pub mod expansion;
pub mod tokenization;

pub use building::TreeBuilding;
pub use conversion::XmlConversion;
pub use desugaring::Desugaring;
pub use expansion::TemplateExpansion;
pub use tokenization::Tokenization;
