//! Configuration module

mod site;

pub use site::GistConfig;
pub use site::SiteConfig;
