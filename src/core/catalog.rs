//! The compiled-in writeup catalog.
//!
//! Records and categories are parsed once from `builtin/writeups.toml` and
//! never change at runtime. Every lookup here is pure; "not found" is the only
//! failure and callers turn it into a message for the user.

use serde::Deserialize;
use std::error::Error as StdError;
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Mixed,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Mixed => "Mixed",
        }
    }

    /// Single-glyph marker used in listings.
    pub fn marker(self) -> &'static str {
        match self {
            Difficulty::Easy => "🟢",
            Difficulty::Medium => "🟡",
            Difficulty::Hard => "🔴",
            Difficulty::Mixed => "🟣",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Platform {
    #[serde(rename = "HTB")]
    Htb,
    #[serde(rename = "picoCTF")]
    PicoCtf,
    TryHackMe,
    #[serde(rename = "CTFd")]
    Ctfd,
    Other,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Platform::Htb => "HackTheBox",
            Platform::PicoCtf => "picoCTF",
            Platform::TryHackMe => "TryHackMe",
            Platform::Ctfd => "CTFd",
            Platform::Other => "Other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Writeup {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    pub file_path: String,
    pub platform: Option<Platform>,
    pub event: Option<String>,
    pub challenge_count: Option<u32>,
}

impl Writeup {
    /// Effective categories: the single `category` followed by any listed
    /// `categories`, without repeats.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for name in self.category.iter().chain(self.categories.iter()) {
            if !out.contains(&name.as_str()) {
                out.push(name);
            }
        }
        out
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category) || self.categories.iter().any(|c| c == category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub name: String,
    pub description: String,
}

#[derive(Debug)]
pub enum CatalogError {
    Parse(toml::de::Error),
    DuplicateId(String),
    DuplicateCategory(String),
    UnknownCategory { writeup: String, category: String },
    MissingCategory(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse(err) => write!(f, "Failed to parse catalog: {err}"),
            CatalogError::DuplicateId(id) => write!(f, "Duplicate writeup id '{id}'"),
            CatalogError::DuplicateCategory(name) => write!(f, "Duplicate category '{name}'"),
            CatalogError::UnknownCategory { writeup, category } => write!(
                f,
                "Writeup '{writeup}' references unknown category '{category}'"
            ),
            CatalogError::MissingCategory(id) => write!(f, "Writeup '{id}' has no category"),
        }
    }
}

impl StdError for CatalogError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CatalogError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    writeups: Vec<Writeup>,
    #[serde(default)]
    categories: Vec<Category>,
}

static BUILTIN_CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
    const CONTENT: &str = include_str!("../../builtin/writeups.toml");
    Catalog::from_toml(CONTENT).expect("Failed to parse builtin/writeups.toml")
});

impl Catalog {
    pub fn builtin() -> &'static Catalog {
        &BUILTIN_CATALOG
    }

    /// Parse and check a catalog: ids and category names are unique and every
    /// record belongs to at least one known category.
    pub fn from_toml(content: &str) -> Result<Catalog, CatalogError> {
        let catalog: Catalog = toml::from_str(content).map_err(CatalogError::Parse)?;

        for (index, category) in catalog.categories.iter().enumerate() {
            if catalog.categories[..index]
                .iter()
                .any(|c| c.name == category.name)
            {
                return Err(CatalogError::DuplicateCategory(category.name.clone()));
            }
        }

        for (index, writeup) in catalog.writeups.iter().enumerate() {
            if catalog.writeups[..index].iter().any(|w| w.id == writeup.id) {
                return Err(CatalogError::DuplicateId(writeup.id.clone()));
            }
            let categories = writeup.categories();
            if categories.is_empty() {
                return Err(CatalogError::MissingCategory(writeup.id.clone()));
            }
            if let Some(unknown) = categories.iter().find(|c| !catalog.has_category(c)) {
                return Err(CatalogError::UnknownCategory {
                    writeup: writeup.id.clone(),
                    category: unknown.to_string(),
                });
            }
        }

        Ok(catalog)
    }

    pub fn writeups(&self) -> &[Writeup] {
        &self.writeups
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Writeup> {
        self.writeups.iter().find(|w| w.id == id)
    }

    pub fn find_by_category(&self, category: &str) -> Vec<&Writeup> {
        self.writeups
            .iter()
            .filter(|w| w.in_category(category))
            .collect()
    }

    pub fn list_categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    pub fn count_in_category(&self, name: &str) -> usize {
        self.writeups.iter().filter(|w| w.in_category(name)).count()
    }
}
