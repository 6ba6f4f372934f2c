//! The sub-sites the CLI can render.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use folio_render::DocumentShell;
use folio_router::{RegistryError, TemplateRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Blogs,
    Academy,
}

impl Site {
    pub const ALL: [Site; 2] = [Site::Blogs, Site::Academy];

    pub fn name(self) -> &'static str {
        match self {
            Site::Blogs => "blogs",
            Site::Academy => "academy",
        }
    }

    /// Host the site's pages are uploaded under.
    pub fn host(self) -> &'static str {
        match self {
            Site::Blogs => folio_blogs::HOST,
            Site::Academy => folio_academy::HOST,
        }
    }

    pub fn registry(self) -> Result<TemplateRegistry, RegistryError> {
        match self {
            Site::Blogs => folio_blogs::registry(),
            Site::Academy => folio_academy::registry(),
        }
    }

    pub fn document(self) -> DocumentShell {
        match self {
            Site::Blogs => folio_blogs::document(),
            Site::Academy => folio_academy::document(),
        }
    }
}

impl FromStr for Site {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Site::ALL.into_iter().find(|site| site.name() == s) {
            Some(site) => Ok(site),
            None => bail!("Unknown site: {} (expected blogs or academy)", s),
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
