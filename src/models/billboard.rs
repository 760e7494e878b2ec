//! Billboard inventory records.
//!
//! The inventory exports this data arrived from used inconsistent field
//! casing (`Size` next to `size`, `Nearest_Landmark` next to `location`).
//! Serde aliases absorb every legacy spelling at load time, so the rest of
//! the application, the pricing engine included, only ever sees this one
//! canonical shape.

use serde::Deserialize;

const BILLBOARDS_JSON: &str = include_str!("../../data/billboards.json");

#[derive(Debug, Clone, Deserialize)]
pub struct Billboard {
    #[serde(alias = "ID", alias = "Billboard_ID")]
    pub id: String,
    #[serde(alias = "Billboard_Name", default)]
    pub name: String,
    #[serde(alias = "City", default)]
    pub city: String,
    #[serde(alias = "Municipality", default)]
    pub municipality: String,
    #[serde(alias = "District", default)]
    pub district: String,
    #[serde(alias = "Nearest_Landmark", alias = "location", default)]
    pub landmark: String,
    #[serde(alias = "Size")]
    pub size: String,
    #[serde(alias = "Level")]
    pub level: String,
    #[serde(alias = "Faces_Count", default = "default_faces")]
    pub faces: String,
    #[serde(alias = "GPS_Coordinates", default)]
    pub coordinates: String,
    #[serde(alias = "GPS_Link", default)]
    pub gps_link: String,
    #[serde(alias = "Image_URL", alias = "image", default)]
    pub image_url: String,
    #[serde(default)]
    pub status: BillboardStatus,
}

fn default_faces() -> String {
    "وجهين".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillboardStatus {
    #[default]
    Available,
    Rented,
    Maintenance,
}

impl BillboardStatus {
    pub fn label(self) -> &'static str {
        match self {
            BillboardStatus::Available => "متاح",
            BillboardStatus::Rented => "محجوز",
            BillboardStatus::Maintenance => "صيانة",
        }
    }
}

impl Billboard {
    /// Google Maps link derived from the stored coordinates, falling back
    /// to the shipped GPS link when they are absent or unusable.
    pub fn map_url(&self) -> String {
        if let Some((lat, lng)) = self.coordinates.split_once(',') {
            let (lat, lng) = (lat.trim(), lng.trim());
            if !lat.is_empty() && !lng.is_empty() {
                return format!("https://www.google.com/maps?q={lat},{lng}");
            }
        }
        if self.gps_link.is_empty() {
            "https://www.google.com/maps".to_string()
        } else {
            self.gps_link.clone()
        }
    }
}

/// The shipped billboard set, loaded once at startup and never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct Inventory {
    billboards: Vec<Billboard>,
}

impl Inventory {
    pub fn load_default() -> Self {
        serde_json::from_str(BILLBOARDS_JSON).expect("embedded billboard inventory must parse")
    }

    pub fn all(&self) -> &[Billboard] {
        &self.billboards
    }

    pub fn find(&self, id: &str) -> Option<&Billboard> {
        self.billboards.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.billboards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.billboards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_inventory_parses() {
        let inventory = Inventory::load_default();
        assert!(!inventory.is_empty());
        // Every record ends up with the canonical pricing key fields.
        for billboard in inventory.all() {
            assert!(!billboard.id.is_empty());
            assert!(!billboard.size.is_empty());
            assert!(!billboard.level.is_empty());
        }
    }

    #[test]
    fn legacy_field_casings_canonicalize() {
        let billboard: Billboard = serde_json::from_str(
            r#"{
                "ID": "TR-042",
                "Billboard_Name": "لوحة شارع الجمهورية",
                "City": "طرابلس",
                "District": "سوق الجمعة",
                "Nearest_Landmark": "جسر المشتل",
                "Size": "12x4",
                "Level": "A",
                "GPS_Coordinates": "32.8872, 13.1913"
            }"#,
        )
        .expect("legacy record parses");

        assert_eq!(billboard.id, "TR-042");
        assert_eq!(billboard.city, "طرابلس");
        assert_eq!(billboard.landmark, "جسر المشتل");
        assert_eq!(billboard.size, "12x4");
        assert_eq!(billboard.level, "A");
        assert_eq!(billboard.status, BillboardStatus::Available);
        assert_eq!(billboard.faces, "وجهين");
    }

    #[test]
    fn map_url_prefers_coordinates() {
        let billboard: Billboard = serde_json::from_str(
            r#"{ "id": "1", "size": "12x4", "level": "A", "coordinates": "32.8872, 13.1913" }"#,
        )
        .expect("parses");
        assert_eq!(billboard.map_url(), "https://www.google.com/maps?q=32.8872,13.1913");
    }

    #[test]
    fn map_url_falls_back_without_coordinates() {
        let with_link: Billboard = serde_json::from_str(
            r#"{ "id": "1", "size": "12x4", "level": "A", "GPS_Link": "https://maps.app.goo.gl/abc" }"#,
        )
        .expect("parses");
        assert_eq!(with_link.map_url(), "https://maps.app.goo.gl/abc");

        let bare: Billboard = serde_json::from_str(
            r#"{ "id": "1", "size": "12x4", "level": "A", "coordinates": "32.8872" }"#,
        )
        .expect("parses");
        assert_eq!(bare.map_url(), "https://www.google.com/maps");
    }
}
