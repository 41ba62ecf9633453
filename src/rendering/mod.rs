pub mod asm;
pub mod bitplane;
pub mod ocs;

pub use asm::AsmSource;
pub use ocs::OcsColor;
