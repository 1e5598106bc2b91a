//! Static catalog of purchasable arrow cosmetics.

use serde::{Deserialize, Serialize};

use super::CosmeticId;

/// Identifier of the cosmetic every player starts with.
pub const DEFAULT_COSMETIC_ID: &str = "default";

/// A purchasable visual customization; distinct from gameplay progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cosmetic {
    pub id: CosmeticId,
    pub name: String,
    pub price: u64,
}

/// Immutable reference data describing the in-game shop.
///
/// Seeded into fresh documents and never mutated by reconciliation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosmeticCatalog {
    pub arrow_skins: Vec<Cosmetic>,
}

impl CosmeticCatalog {
    /// The standard shop contents.
    pub fn standard() -> Self {
        let skins = [
            (DEFAULT_COSMETIC_ID, "Classic", 0),
            ("fire", "Fire", 100),
            ("ice", "Ice", 150),
            ("neon", "Neon", 200),
            ("gold", "Gold", 300),
            ("rainbow", "Rainbow", 500),
        ];
        Self {
            arrow_skins: skins
                .into_iter()
                .map(|(id, name, price)| Cosmetic {
                    id: CosmeticId::new(id),
                    name: name.to_owned(),
                    price,
                })
                .collect(),
        }
    }

    pub fn get(&self, id: &CosmeticId) -> Option<&Cosmetic> {
        self.arrow_skins.iter().find(|cosmetic| &cosmetic.id == id)
    }

    pub fn contains(&self, id: &CosmeticId) -> bool {
        self.get(id).is_some()
    }
}

impl Default for CosmeticCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
