//! Equipment catalog and purchase eligibility.
//!
//! The shop is a fixed catalog of ten items, two tiers across five
//! categories. Every player starts with the basic phone, which is not for
//! sale. Only phones, cameras, microphones and lighting affect content
//! quality; computers and backgrounds are cosmetic for now.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCategory {
    Phone,
    Camera,
    Microphone,
    Lighting,
    Computer,
    Background,
}

impl EquipmentCategory {
    /// Does gear in this category feed the content quality formula?
    pub fn affects_quality(self) -> bool {
        matches!(
            self,
            EquipmentCategory::Phone
                | EquipmentCategory::Camera
                | EquipmentCategory::Microphone
                | EquipmentCategory::Lighting
        )
    }
}

/// A piece of equipment owned by the player's room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub category: EquipmentCategory,
    /// 1 (junk) to 10 (top of the line).
    pub quality: u8,
    pub price: i64,
    pub description: String,
    pub level_required: u32,
}

/// Static catalog row; converted into an owned [`Equipment`] on purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: &'static str,
    pub name: &'static str,
    pub category: EquipmentCategory,
    pub quality: u8,
    pub price: i64,
    pub description: &'static str,
    pub level_required: u32,
}

impl CatalogItem {
    pub fn to_equipment(&self) -> Equipment {
        Equipment {
            id: self.id.to_string(),
            name: self.name.to_string(),
            category: self.category,
            quality: self.quality,
            price: self.price,
            description: self.description.to_string(),
            level_required: self.level_required,
        }
    }
}

/// The phone every new player starts with.
pub const STARTER_PHONE: CatalogItem = CatalogItem {
    id: "basic-phone",
    name: "Basic Phone",
    category: EquipmentCategory::Phone,
    quality: 1,
    price: 0,
    description: "An old, basic phone that records low quality video",
    level_required: 1,
};

/// Everything the shop sells, in display order.
pub const CATALOG: [CatalogItem; 10] = [
    // Phones
    CatalogItem {
        id: "decent-phone",
        name: "Decent Phone",
        category: EquipmentCategory::Phone,
        quality: 3,
        price: 200,
        description: "A phone with a better camera for mid-quality videos",
        level_required: 2,
    },
    CatalogItem {
        id: "premium-smartphone",
        name: "Premium Smartphone",
        category: EquipmentCategory::Phone,
        quality: 5,
        price: 800,
        description: "High-end phone with an excellent camera",
        level_required: 4,
    },
    // Cameras
    CatalogItem {
        id: "hd-webcam",
        name: "HD Webcam",
        category: EquipmentCategory::Camera,
        quality: 4,
        price: 150,
        description: "Basic webcam for better quality streams",
        level_required: 2,
    },
    CatalogItem {
        id: "dslr-camera",
        name: "DSLR Camera",
        category: EquipmentCategory::Camera,
        quality: 7,
        price: 1500,
        description: "Professional camera for high quality content",
        level_required: 5,
    },
    // Microphones
    CatalogItem {
        id: "usb-microphone",
        name: "USB Microphone",
        category: EquipmentCategory::Microphone,
        quality: 3,
        price: 100,
        description: "Basic microphone for better audio",
        level_required: 2,
    },
    CatalogItem {
        id: "studio-microphone",
        name: "Studio Microphone",
        category: EquipmentCategory::Microphone,
        quality: 6,
        price: 500,
        description: "Studio microphone for crystal clear audio",
        level_required: 4,
    },
    // Lighting
    CatalogItem {
        id: "ring-light",
        name: "Ring Light",
        category: EquipmentCategory::Lighting,
        quality: 4,
        price: 80,
        description: "Basic lighting to improve your presentation",
        level_required: 2,
    },
    CatalogItem {
        id: "pro-lighting-kit",
        name: "Pro Lighting Kit",
        category: EquipmentCategory::Lighting,
        quality: 6,
        price: 400,
        description: "A complete lighting setup",
        level_required: 4,
    },
    // Computers
    CatalogItem {
        id: "editing-laptop",
        name: "Editing Laptop",
        category: EquipmentCategory::Computer,
        quality: 3,
        price: 600,
        description: "Entry-level laptop for editing videos",
        level_required: 3,
    },
    CatalogItem {
        id: "streaming-pc",
        name: "Streaming PC",
        category: EquipmentCategory::Computer,
        quality: 7,
        price: 2000,
        description: "Powerful PC for professional streaming and editing",
        level_required: 5,
    },
];

/// Look up a catalog item by id.
pub fn find_catalog_item(id: &str) -> Option<&'static CatalogItem> {
    CATALOG.iter().find(|item| item.id == id)
}

/// Items the player could buy right now, in catalog order.
pub fn available_equipment(player_level: u32, money: i64) -> Vec<Equipment> {
    CATALOG
        .iter()
        .filter(|item| item.level_required <= player_level && item.price <= money)
        .map(CatalogItem::to_equipment)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        assert_eq!(CATALOG.len(), 10);
        for item in &CATALOG {
            assert!((1..=10).contains(&item.quality), "{}", item.id);
            assert!(item.price > 0);
            assert_ne!(item.id, STARTER_PHONE.id);
        }
        let categories: std::collections::HashSet<_> =
            CATALOG.iter().map(|i| i.category).collect();
        assert_eq!(categories.len(), 5);
    }

    #[test]
    fn test_catalog_ids_unique() {
        let ids: std::collections::HashSet<_> = CATALOG.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn test_nothing_available_at_start() {
        assert!(available_equipment(1, 100).is_empty());
    }

    #[test]
    fn test_available_filters_by_level_and_money() {
        let items = available_equipment(2, 150);
        let ids: Vec<_> = items.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["hd-webcam", "usb-microphone", "ring-light"]);

        let everything = available_equipment(5, 10_000);
        assert_eq!(everything.len(), CATALOG.len());
        assert_eq!(everything[0].id, "decent-phone");
    }

    #[test]
    fn test_find_catalog_item() {
        let dslr = find_catalog_item("dslr-camera").unwrap();
        assert_eq!(dslr.quality, 7);
        assert_eq!(dslr.category, EquipmentCategory::Camera);
        assert!(find_catalog_item("basic-phone").is_none());
        assert!(find_catalog_item("jetpack").is_none());
    }

    #[test]
    fn test_quality_categories() {
        assert!(EquipmentCategory::Lighting.affects_quality());
        assert!(!EquipmentCategory::Computer.affects_quality());
        assert!(!EquipmentCategory::Background.affects_quality());
    }
}
