// Stand-in backends (always available)
pub mod dummy;
pub mod invalid;
pub mod mock;

// Real vendor integrations
#[cfg(feature = "geneart")]
pub mod geneart;
#[cfg(feature = "idt")]
pub mod idt;
