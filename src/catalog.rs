//! Product catalog and repair price list.
//!
//! Both are JSON documents on disk, re-read on every lookup so that a file
//! replaced through the upload endpoint takes effect immediately. Lookup is
//! case-insensitive substring matching on the model name, same as the
//! storefront spreadsheet the documents are exported from.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bot::state::{Product, RepairService};
use crate::core::error::{AppError, AppResult};

/// Sealed/used device catalog.
pub struct Catalog {
    path: PathBuf,
}

impl Catalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole catalog document.
    pub fn load(&self) -> AppResult<Vec<Product>> {
        let raw = fs_err::read_to_string(&self.path)
            .map_err(|e| AppError::Catalog(format!("cannot read {}: {}", self.path.display(), e)))?;
        let products: Vec<Product> =
            serde_json::from_str(&raw).map_err(|e| AppError::Catalog(format!("malformed catalog: {}", e)))?;
        Ok(products)
    }

    /// Case-insensitive substring search on the product name.
    pub fn search(&self, query: &str) -> AppResult<Vec<Product>> {
        let needle = query.trim().to_lowercase();
        let products = self.load()?;
        Ok(products
            .into_iter()
            .filter(|p| p.produto.to_lowercase().contains(&needle))
            .collect())
    }
}

/// One row of the repair price list. A missing price means the service is
/// not offered for that model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairEntry {
    pub modelo: String,
    #[serde(default)]
    pub tela: Option<f64>,
    #[serde(default)]
    pub bateria: Option<f64>,
    #[serde(default)]
    pub tampa: Option<f64>,
}

impl RepairEntry {
    pub fn price_for(&self, service: RepairService) -> Option<f64> {
        match service {
            RepairService::Screen => self.tela,
            RepairService::Battery => self.bateria,
            RepairService::BackCover => self.tampa,
        }
    }
}

/// Repair price list for the technical-assistance trail.
pub struct RepairPriceList {
    path: PathBuf,
}

impl RepairPriceList {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> AppResult<Vec<RepairEntry>> {
        let raw = fs_err::read_to_string(&self.path)
            .map_err(|e| AppError::Catalog(format!("cannot read {}: {}", self.path.display(), e)))?;
        let entries: Vec<RepairEntry> =
            serde_json::from_str(&raw).map_err(|e| AppError::Catalog(format!("malformed price list: {}", e)))?;
        Ok(entries)
    }

    /// First row whose model contains the query, case-insensitively.
    pub fn lookup(&self, model_query: &str) -> AppResult<Option<RepairEntry>> {
        let needle = model_query.trim().to_lowercase();
        let entries = self.load()?;
        Ok(entries.into_iter().find(|e| e.modelo.to_lowercase().contains(&needle)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn catalog_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"produto": "iPhone 12 128GB", "preco": 3500.0, "cor": "Preto"}},
                {{"produto": "iPhone 12 Pro 256GB", "preco": 4800.0, "cor": "Azul", "detalhe": "bateria 88%"}},
                {{"produto": "iPhone 13 128GB", "preco": 4200.0, "cor": "Branco"}}
            ]"#
        )
        .unwrap();
        file
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let file = catalog_file();
        let catalog = Catalog::new(file.path());

        let hits = catalog.search("iphone 12").unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].produto, "iPhone 12 128GB");
        assert_eq!(hits[1].produto, "iPhone 12 Pro 256GB");

        let hits = catalog.search("  IPHONE 13 ").unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_search_no_match_is_empty_not_error() {
        let file = catalog_file();
        let catalog = Catalog::new(file.path());
        assert!(catalog.search("galaxy").unwrap().is_empty());
    }

    #[test]
    fn test_condition_derived_from_detail() {
        let file = catalog_file();
        let catalog = Catalog::new(file.path());
        let hits = catalog.search("iphone 12").unwrap();
        assert_eq!(hits[0].condition(), "Lacrado");
        assert_eq!(hits[1].condition(), "Seminovo (bateria 88%)");
    }

    #[test]
    fn test_missing_file_is_catalog_error() {
        let catalog = Catalog::new("/nonexistent/produtos.json");
        assert!(matches!(catalog.search("iphone"), Err(AppError::Catalog(_))));
    }

    #[test]
    fn test_repair_lookup_and_missing_service() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"modelo": "iPhone 11", "tela": 450.0, "bateria": 250.0}},
                {{"modelo": "iPhone 12", "tela": 550.0, "bateria": 300.0, "tampa": 400.0}}
            ]"#
        )
        .unwrap();

        let prices = RepairPriceList::new(file.path());
        let entry = prices.lookup("iphone 11").unwrap().unwrap();
        assert_eq!(entry.price_for(RepairService::Screen), Some(450.0));
        assert_eq!(entry.price_for(RepairService::BackCover), None);

        assert!(prices.lookup("iphone 15").unwrap().is_none());
    }
}
